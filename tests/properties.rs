use barloader_rs::{
    calculator::{fill, EPSILON},
    catalog::PlateCatalog,
    convert::convert,
    ledger::InventoryLedger,
    unit::{Precision, Unit},
};
use proptest::prelude::*;

fn arb_unit() -> impl Strategy<Value = Unit> {
    prop_oneof![Just(Unit::Lbs), Just(Unit::Kg)]
}

fn arb_precision() -> impl Strategy<Value = Precision> {
    prop_oneof![Just(Precision::Standard), Just(Precision::High)]
}

fn ledger_from(unit: Unit, counts: &[i64]) -> InventoryLedger {
    let mut ledger = InventoryLedger::default();
    for (plate, count) in PlateCatalog::for_unit(unit).plates().zip(counts) {
        ledger.set_count(plate, *count);
    }
    ledger
}

// ── Pairs never exceed what is on hand ───────────────────────────────────

proptest! {
    #[test]
    fn loadout_respects_inventory(
        unit in arb_unit(),
        counts in prop::collection::vec(0i64..12, 7),
        target in 0.0f64..900.0,
        bar in prop_oneof![Just(0.0), Just(15.0), Just(20.0), Just(45.0)],
    ) {
        let catalog = PlateCatalog::for_unit(unit);
        let ledger = ledger_from(unit, &counts);
        let result = fill(target, bar, catalog, &ledger);

        for plate in catalog.plates() {
            let mounted = result.loadout.occurrences(plate) as u64;
            prop_assert!(
                mounted * 2 <= u64::from(ledger.count(plate)),
                "{} mounted {} times with only {} on hand",
                plate,
                mounted,
                ledger.count(plate)
            );
        }
    }
}

// ── Greedy stops only when nothing else fits ─────────────────────────────

proptest! {
    #[test]
    fn nothing_left_that_fits(
        unit in arb_unit(),
        counts in prop::collection::vec(0i64..12, 7),
        target in 0.0f64..900.0,
    ) {
        let catalog = PlateCatalog::for_unit(unit);
        let ledger = ledger_from(unit, &counts);
        let bar = 20.0;
        prop_assume!(target >= bar);
        let result = fill(target, bar, catalog, &ledger);

        let loaded = result.loadout.side_weight() * 2.0 + bar;
        prop_assert!(loaded <= target + 4.0 * EPSILON);
        prop_assert!(result.remainder_per_side >= -EPSILON - 1e-9);

        for plate in catalog.plates() {
            let left = ledger.count(plate) as usize - 2 * result.loadout.occurrences(plate);
            prop_assert!(
                result.remainder_per_side < plate.weight() - EPSILON || left < 2,
                "{} still fits with {} left and {} remaining",
                plate,
                left,
                result.remainder_per_side
            );
        }

        let weights = result.loadout.weights();
        prop_assert!(weights.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}

// ── The ledger is only read ──────────────────────────────────────────────

proptest! {
    #[test]
    fn fill_leaves_ledger_alone(
        counts in prop::collection::vec(0i64..6, 7),
        target in 45.0f64..600.0,
    ) {
        let ledger = ledger_from(Unit::Lbs, &counts);
        let before = ledger.clone();
        let _ = fill(target, 45.0, PlateCatalog::for_unit(Unit::Lbs), &ledger);
        prop_assert_eq!(ledger, before);
    }
}

// ── Conversion ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_unit_is_exact(value in any::<f64>(), unit in arb_unit(), precision in arb_precision()) {
        prop_assert_eq!(convert(value, unit, unit, precision).to_bits(), value.to_bits());
    }

    #[test]
    fn round_trip_within_one_step(
        steps in 0u32..20_000,
        unit in arb_unit(),
        precision in arb_precision(),
    ) {
        let value = f64::from(steps) * precision.step(unit);
        let there = convert(value, unit, unit.other(), precision);
        let back = convert(there, unit.other(), unit, precision);
        prop_assert!(
            (back - value).abs() <= precision.step(unit) + 1e-9,
            "{} {} came back as {}",
            value,
            unit,
            back
        );
    }

    #[test]
    fn cross_unit_lands_on_grid(value in 0.0f64..2000.0, unit in arb_unit(), precision in arb_precision()) {
        let to = unit.other();
        let converted = convert(value, unit, to, precision);
        let scaled = converted * precision.divisions(to);
        prop_assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
