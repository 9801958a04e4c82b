use tracing::warn;

use crate::plate::Plate;
use crate::session::Session;
use crate::snapshot::Snapshot;
use crate::unit::{Precision, Unit};

#[swift_bridge::bridge]
mod ffi {
    extern "Rust" {
        type PlateLoader;

        #[swift_bridge(init)]
        fn new() -> PlateLoader;

        fn restore(self: &mut PlateLoader, json: String) -> bool;
        fn needs_save(self: &PlateLoader) -> bool;
        fn snapshot_json(self: &mut PlateLoader) -> String;

        fn unit(self: &PlateLoader) -> String;
        fn set_unit(self: &mut PlateLoader, unit: String) -> bool;
        fn high_precision(self: &PlateLoader) -> bool;
        fn set_high_precision(self: &mut PlateLoader, high: bool);
        fn select_bar(self: &mut PlateLoader, id: String) -> bool;
        fn bar_name(self: &PlateLoader) -> String;

        fn add_custom_bar(
            self: &mut PlateLoader,
            name: String,
            weight: f64,
            unit: String,
        ) -> Result<String, String>;
        fn delete_custom_bar(self: &mut PlateLoader, id: String) -> bool;
        fn custom_bars_json(self: &PlateLoader) -> String;

        fn add_plate(self: &mut PlateLoader, weight: f64) -> bool;
        fn remove_plate(self: &mut PlateLoader, weight: f64) -> bool;
        fn clear(self: &mut PlateLoader);
        fn calculate(self: &mut PlateLoader, target: f64) -> Option<String>;
        fn shortfall(self: &PlateLoader) -> f64;
        fn can_add(self: &PlateLoader, weight: f64) -> bool;

        fn set_inventory(self: &mut PlateLoader, weight: f64, count: i64) -> u32;
        fn inventory(self: &PlateLoader, weight: f64) -> u32;

        fn plates(self: &PlateLoader) -> Vec<f64>;
        fn catalog_weights(self: &PlateLoader) -> Vec<f64>;
        fn plate_color(self: &PlateLoader, weight: f64) -> Option<String>;
        fn bar_weight(self: &PlateLoader) -> f64;
        fn side_weight(self: &PlateLoader) -> f64;
        fn total_weight(self: &PlateLoader) -> f64;
    }
}

/// Session handle for a native UI shell. The shell renders whatever these
/// accessors return and persists `snapshot_json` after each mutation, and
/// after a `restore` whenever `needs_save` is true.
#[derive(Debug, Default)]
pub struct PlateLoader {
    session: Session,
    repaired: bool,
    shortfall: f64,
}

impl PlateLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the session with a saved snapshot. Unparseable input keeps
    /// the default session and returns false.
    pub fn restore(&mut self, json: String) -> bool {
        self.shortfall = 0.0;
        match serde_json::from_str::<Snapshot>(&json) {
            Ok(snapshot) => {
                (self.session, self.repaired) = snapshot.into_session();
                true
            }
            Err(error) => {
                warn!(%error, "failed to restore state, using defaults");
                self.session = Session::default();
                self.repaired = false;
                false
            }
        }
    }

    /// True when the last `restore` corrected the saved state, e.g. a
    /// selected custom bar that no longer exists.
    #[must_use]
    pub fn needs_save(&self) -> bool {
        self.repaired
    }

    /// The session in its saved form. Taking it clears `needs_save`.
    pub fn snapshot_json(&mut self) -> String {
        self.repaired = false;
        serde_json::to_string(&Snapshot::from(&self.session)).unwrap_or_default()
    }

    #[must_use]
    pub fn unit(&self) -> String {
        self.session.unit().to_string()
    }

    pub fn set_unit(&mut self, unit: String) -> bool {
        match unit.parse::<Unit>() {
            Ok(unit) => {
                self.session.set_unit(unit);
                true
            }
            Err(_) => false,
        }
    }

    #[must_use]
    pub fn high_precision(&self) -> bool {
        self.session.precision().is_high()
    }

    pub fn set_high_precision(&mut self, high: bool) {
        self.session.set_precision(Precision::from_high(high));
    }

    pub fn select_bar(&mut self, id: String) -> bool {
        self.session.select_bar(&id).is_ok()
    }

    #[must_use]
    pub fn bar_name(&self) -> String {
        self.session.bar().display_name
    }

    /// Creates a custom bar and returns its id.
    ///
    /// # Errors
    /// The user-facing message when the unit, name or weight is rejected.
    pub fn add_custom_bar(&mut self, name: String, weight: f64, unit: String) -> Result<String, String> {
        let unit = unit.parse::<Unit>()?;
        self.session
            .add_custom_bar(&name, weight, unit)
            .map(|bar| bar.id.clone())
            .map_err(|error| error.to_string())
    }

    pub fn delete_custom_bar(&mut self, id: String) -> bool {
        self.session.delete_custom_bar(&id)
    }

    #[must_use]
    pub fn custom_bars_json(&self) -> String {
        serde_json::to_string(self.session.custom_bars()).unwrap_or_default()
    }

    pub fn add_plate(&mut self, weight: f64) -> bool {
        self.session.add_plate(weight).is_ok()
    }

    pub fn remove_plate(&mut self, weight: f64) -> bool {
        self.session.remove_plate(weight)
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Loads the best fit for `target`; returns the error message when the
    /// target is rejected.
    pub fn calculate(&mut self, target: f64) -> Option<String> {
        match self.session.calculate(target) {
            Ok(fill) => {
                self.shortfall = fill.shortfall();
                None
            }
            Err(error) => Some(error.to_string()),
        }
    }

    /// How far the last successful `calculate` fell short of its target.
    #[must_use]
    pub fn shortfall(&self) -> f64 {
        self.shortfall
    }

    #[must_use]
    pub fn can_add(&self, weight: f64) -> bool {
        self.session
            .catalog()
            .find(weight)
            .is_some_and(|plate| self.session.can_add(plate))
    }

    /// Sets the count for a plate of the current unit. Returns the stored,
    /// clamped count, or 0 for an unknown weight.
    pub fn set_inventory(&mut self, weight: f64, count: i64) -> u32 {
        self.session
            .set_inventory(self.session.unit(), weight, count)
            .unwrap_or(0)
    }

    #[must_use]
    pub fn inventory(&self, weight: f64) -> u32 {
        self.session
            .catalog()
            .find(weight)
            .map_or(0, |plate| self.session.ledger().count(plate))
    }

    #[must_use]
    pub fn plates(&self) -> Vec<f64> {
        self.session.loadout().weights()
    }

    #[must_use]
    pub fn catalog_weights(&self) -> Vec<f64> {
        self.session.catalog().plates().map(|p: Plate| p.weight()).collect()
    }

    #[must_use]
    pub fn plate_color(&self, weight: f64) -> Option<String> {
        let catalog = self.session.catalog();
        let plate = catalog.find(weight)?;
        catalog.style(plate).map(|style| style.color.to_string())
    }

    #[must_use]
    pub fn bar_weight(&self) -> f64 {
        self.session.bar_weight()
    }

    #[must_use]
    pub fn side_weight(&self) -> f64 {
        self.session.side_weight()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.session.total_weight()
    }
}
