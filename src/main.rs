use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use itertools::Itertools;
use tracing::info;

use barloader_rs::{
    bar::BarSelection,
    bar_kind::BarKind,
    config::Config,
    convert::convert,
    logging,
    plate::format_weight,
    session::Session,
    unit::{Precision, Unit},
};

#[derive(Parser)]
#[command(name = "barloader", version, about = "Barbell plate calculator")]
struct Args {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Saved state file (overrides the config).
    #[arg(long, value_name = "PATH", global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the bar, loadout and totals.
    Show,
    /// Add a pair of plates per weight given.
    Add { weights: Vec<f64> },
    /// Remove a pair of plates per weight given.
    Remove { weights: Vec<f64> },
    /// Take every plate off the bar.
    Clear,
    /// Load the best fit for a target total weight.
    Calc {
        target: f64,
        /// Show the result without changing the saved loadout.
        #[arg(long)]
        dry_run: bool,
    },
    /// Switch unit system (clears the loadout).
    Unit { unit: Unit },
    /// Select a bar by id (men, women, zero or a custom id).
    Bar { id: String },
    /// List standard and custom bars.
    Bars,
    /// Manage custom bars.
    #[command(subcommand)]
    Custom(CustomCommand),
    /// Show or edit plate inventory.
    Inventory {
        #[command(subcommand)]
        command: Option<InventoryCommand>,
    },
    /// Set conversion precision (standard or high).
    Precision { precision: Precision },
    /// Convert a weight between units.
    Convert {
        value: f64,
        from: Unit,
        to: Unit,
        #[arg(long, default_value = "standard")]
        precision: Precision,
    },
    /// Show or change the saved configuration.
    Config {
        /// Unit system for fresh sessions.
        #[arg(long, value_name = "UNIT")]
        set_unit: Option<Unit>,
        /// Start fresh sessions in high-precision mode.
        #[arg(long, value_name = "BOOL")]
        set_high_precision: Option<bool>,
        /// Where to save session state.
        #[arg(long, value_name = "PATH")]
        set_state_file: Option<PathBuf>,
        /// Restore every setting to its default.
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum CustomCommand {
    /// Create a custom bar.
    Add {
        name: String,
        weight: f64,
        /// Unit of the weight (defaults to the current unit).
        #[arg(long)]
        unit: Option<Unit>,
    },
    /// Delete a custom bar by id.
    Delete { id: String },
}

#[derive(Subcommand)]
enum InventoryCommand {
    /// Set the on-hand count of a plate weight.
    Set {
        weight: f64,
        #[arg(allow_negative_numbers = true)]
        count: i64,
        /// Unit of the plate (defaults to the current unit).
        #[arg(long)]
        unit: Option<Unit>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose, args.quiet));

    let mut config = Config::load().context("failed to load config")?;
    let command = args.command.unwrap_or(Command::Show);
    if let Command::Config {
        set_unit,
        set_high_precision,
        set_state_file,
        reset,
    } = command
    {
        return configure(config, set_unit, set_high_precision, set_state_file, reset);
    }

    if args.state.is_some() {
        config.state_file = args.state;
    }
    let store = config.state_store()?;

    let (mut session, repaired) = store.load_or(|| config.fresh_session());

    let changed = run(command, &mut session)?;
    if changed || repaired {
        store
            .save_session(&session)
            .with_context(|| format!("failed to save state to {}", store.path().display()))?;
        info!(path = %store.path().display(), "saved state");
    }

    Ok(())
}

fn configure(
    mut config: Config,
    set_unit: Option<Unit>,
    set_high_precision: Option<bool>,
    set_state_file: Option<PathBuf>,
    reset: bool,
) -> anyhow::Result<()> {
    if reset {
        config = Config::default();
        config.save().context("failed to save config")?;
        println!("Configuration reset to defaults");
        print!("{config}");
        return Ok(());
    }

    let mut modified = false;
    if let Some(unit) = set_unit {
        config.default_unit = unit;
        modified = true;
    }
    if let Some(high) = set_high_precision {
        config.high_precision = high;
        modified = true;
    }
    if let Some(path) = set_state_file {
        config.state_file = Some(path);
        modified = true;
    }

    if modified {
        config.save().context("failed to save config")?;
        println!("Configuration updated");
    }
    print!("{config}");
    Ok(())
}

/// Runs one command against the session. Returns true when the session
/// changed and should be saved.
fn run(command: Command, session: &mut Session) -> anyhow::Result<bool> {
    match command {
        Command::Show | Command::Config { .. } => {
            print_session(session);
            Ok(false)
        }
        Command::Add { weights } => {
            for weight in weights {
                session.add_plate(weight)?;
            }
            print_session(session);
            Ok(true)
        }
        Command::Remove { weights } => {
            for weight in weights {
                if !session.remove_plate(weight) {
                    println!("No {} {} pair on the bar.", format_weight(weight), session.unit());
                }
            }
            print_session(session);
            Ok(true)
        }
        Command::Clear => {
            session.clear();
            print_session(session);
            Ok(true)
        }
        Command::Calc { target, dry_run } => {
            let fill = if dry_run {
                session.preview(target)?
            } else {
                session.calculate(target)?
            };
            if dry_run {
                println!("Per side: {}", fill.loadout);
            } else {
                print_session(session);
            }
            if !fill.is_exact() {
                println!(
                    "Closest reachable is {:.2} {} under target.",
                    fill.shortfall(),
                    session.unit()
                );
            }
            Ok(!dry_run)
        }
        Command::Unit { unit } => {
            session.set_unit(unit);
            print_session(session);
            Ok(true)
        }
        Command::Bar { id } => {
            let spec = session.select_bar(&id)?;
            println!("Selected {}", spec.display_name);
            Ok(true)
        }
        Command::Bars => {
            print_bars(session);
            Ok(false)
        }
        Command::Custom(CustomCommand::Add { name, weight, unit }) => {
            let unit = unit.unwrap_or(session.unit());
            let bar = session.add_custom_bar(&name, weight, unit)?;
            println!("Created {} ({} {}) as {}", bar.name, bar.weight, bar.unit, bar.id);
            Ok(true)
        }
        Command::Custom(CustomCommand::Delete { id }) => {
            anyhow::ensure!(session.delete_custom_bar(&id), "no custom bar with id {id}");
            println!("Deleted {id}");
            Ok(true)
        }
        Command::Inventory { command: None } => {
            print_inventory(session);
            Ok(false)
        }
        Command::Inventory {
            command: Some(InventoryCommand::Set { weight, count, unit }),
        } => {
            let unit = unit.unwrap_or(session.unit());
            let stored = session.set_inventory(unit, weight, count)?;
            println!("{} {unit}: {stored}", format_weight(weight));
            Ok(true)
        }
        Command::Precision { precision } => {
            session.set_precision(precision);
            print_session(session);
            Ok(true)
        }
        Command::Convert {
            value,
            from,
            to,
            precision,
        } => {
            println!(
                "{} {from} = {} {to}",
                format_weight(value),
                format_weight(convert(value, from, to, precision))
            );
            Ok(false)
        }
    }
}

fn print_session(session: &Session) {
    let unit = session.unit();
    println!("{}", session.bar().display_name);
    println!(
        "Total: {:.1} {unit} (plates {:.1} {unit})",
        session.total_weight(),
        session.plates_weight()
    );
    println!("Per side: {}", session.loadout());
}

fn print_bars(session: &Session) {
    let unit = session.unit();
    let marker = |selection: &BarSelection| {
        if session.selection() == selection {
            "*"
        } else {
            " "
        }
    };

    for kind in BarKind::ALL {
        let selection = BarSelection::Standard(kind);
        println!("{} {:<30} {}", marker(&selection), kind.display_name(unit), kind.id());
    }
    for bar in session.custom_bars() {
        let selection = BarSelection::Custom(bar.id.clone());
        println!(
            "{} {:<30} {}",
            marker(&selection),
            format!("{} ({:.1} {unit})", bar.name, bar.weight_in(unit, session.precision())),
            bar.id
        );
    }
}

fn print_inventory(session: &Session) {
    let unit = session.unit();
    let rows = session
        .catalog()
        .plates()
        .map(|plate| {
            let free = session.available_pairs(plate);
            format!(
                "{:>6} {unit}: {:>3} on hand, {:>3} free{}",
                format_weight(plate.weight()),
                session.ledger().count(plate),
                free,
                if free < 2 { " (no pair left)" } else { "" }
            )
        })
        .join("\n");
    println!("{rows}");
}
