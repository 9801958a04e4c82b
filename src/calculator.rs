use std::collections::BTreeMap;

use tracing::trace;

use crate::{
    catalog::PlateCatalog, convert::round_half_up, ledger::InventoryLedger, loadout::Loadout,
    plate::Plate,
};

/// Tolerance for comparing the remaining weight against a plate.
pub const EPSILON: f64 = 0.001;

/// Result of a greedy fill, including what could not be loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub loadout: Loadout,
    /// Weight per side left unloaded. Within `EPSILON` of zero for an exact fit.
    pub remainder_per_side: f64,
}

impl Fill {
    fn empty() -> Self {
        Fill {
            loadout: Loadout::default(),
            remainder_per_side: 0.0,
        }
    }

    /// Total weight short of the target, across both sides.
    #[must_use]
    pub fn shortfall(&self) -> f64 {
        (self.remainder_per_side * 2.0).max(0.0)
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.remainder_per_side.abs() < EPSILON
    }
}

/// Greedy best-fit loadout for `target` on a bar weighing `bar_weight`.
///
/// Unreachable remainders are dropped silently; use [`fill`] to see them.
#[must_use]
pub fn compute_loadout(
    target: f64,
    bar_weight: f64,
    catalog: &PlateCatalog,
    ledger: &InventoryLedger,
) -> Loadout {
    fill(target, bar_weight, catalog, ledger).loadout
}

/// Walks the catalog heaviest first, taking pairs while they fit and are in
/// stock. The ledger is only read; consumption happens on a working copy.
///
/// A target below the bar weight (or NaN) yields an empty fill.
#[must_use]
pub fn fill(
    target: f64,
    bar_weight: f64,
    catalog: &PlateCatalog,
    ledger: &InventoryLedger,
) -> Fill {
    debug_assert!(catalog.is_well_formed(), "malformed plate catalog");

    if target.is_nan() || bar_weight.is_nan() || target < bar_weight {
        return Fill::empty();
    }

    let per_side = (target - bar_weight) / 2.0;
    let mut stock = ledger.stock(catalog.unit());
    let (plates, remainder_per_side) = greedy(per_side, catalog.plates(), &mut stock);

    trace!(
        target_weight = target,
        bar_weight,
        plates = plates.len(),
        remainder_per_side,
        "computed loadout"
    );

    Fill {
        loadout: Loadout::new(plates),
        remainder_per_side,
    }
}

fn greedy(
    mut remaining: f64,
    order: impl Iterator<Item = Plate>,
    stock: &mut BTreeMap<Plate, u32>,
) -> (Vec<Plate>, f64) {
    let mut plates = Vec::new();

    for plate in order {
        let weight = plate.weight();
        let on_hand = stock.entry(plate).or_insert(0);

        while remaining >= weight - EPSILON && *on_hand >= 2 {
            plates.push(plate);
            *on_hand -= 2;
            remaining = round_half_up(remaining - weight, 1000.0);
        }
    }

    (plates, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    fn lbs(weight: f64) -> Plate {
        Plate::from_weight(weight, Unit::Lbs).unwrap()
    }

    fn scarce_ledger() -> InventoryLedger {
        let mut ledger = InventoryLedger::default();
        for plate in PlateCatalog::for_unit(Unit::Lbs).plates() {
            ledger.set_count(plate, 2);
        }
        ledger
    }

    #[test]
    fn single_pair_per_side_for_135() {
        let catalog = PlateCatalog::for_unit(Unit::Lbs);
        let ledger = InventoryLedger::filled(999);
        let loadout = compute_loadout(135.0, 45.0, catalog, &ledger);
        assert_eq!(loadout.weights(), vec![45.0]);
    }

    #[test]
    fn scarce_inventory_falls_through_denominations() {
        let catalog = PlateCatalog::for_unit(Unit::Lbs);
        let result = fill(225.0, 45.0, catalog, &scarce_ledger());
        assert_eq!(result.loadout.weights(), vec![45.0, 35.0, 10.0]);
        assert!(result.is_exact());
    }

    #[test]
    fn below_bar_is_empty() {
        let catalog = PlateCatalog::for_unit(Unit::Lbs);
        let result = fill(40.0, 45.0, catalog, &InventoryLedger::default());
        assert!(result.loadout.is_empty());
        assert!(fill(f64::NAN, 45.0, catalog, &InventoryLedger::default())
            .loadout
            .is_empty());
    }

    #[test]
    fn unreachable_remainder_is_reported_by_fill_only() {
        let catalog = PlateCatalog::for_unit(Unit::Lbs);
        let ledger = InventoryLedger::default();
        let result = fill(136.0, 45.0, catalog, &ledger);
        assert_eq!(result.loadout.weights(), vec![45.0]);
        assert!(!result.is_exact());
        assert!((result.shortfall() - 1.0).abs() < 1e-9);
        assert_eq!(compute_loadout(136.0, 45.0, catalog, &ledger), result.loadout);
    }

    #[test]
    fn fractional_plates_do_not_drift() {
        let catalog = PlateCatalog::for_unit(Unit::Kg);
        let mut ledger = InventoryLedger::empty();
        ledger.set_count(Plate::from_weight(1.25, Unit::Kg).unwrap(), 999);
        // 40 pairs of 1.25 kg per side
        let result = fill(120.0, 20.0, catalog, &ledger);
        assert_eq!(result.loadout.len(), 40);
        assert!(result.is_exact());
    }

    #[test]
    fn leaves_ledger_untouched() {
        let catalog = PlateCatalog::for_unit(Unit::Lbs);
        let ledger = scarce_ledger();
        let before = ledger.clone();
        let _ = compute_loadout(500.0, 45.0, catalog, &ledger);
        assert_eq!(ledger, before);
    }

    #[test]
    fn scan_order_matters() {
        let catalog = PlateCatalog::for_unit(Unit::Lbs);
        let ledger = InventoryLedger::default();

        let (descending, _) = greedy(45.0, catalog.plates(), &mut ledger.stock(Unit::Lbs));
        let (ascending, _) = greedy(45.0, catalog.plates().rev(), &mut ledger.stock(Unit::Lbs));

        assert_eq!(descending, vec![lbs(45.0)]);
        assert_eq!(ascending.len(), 18);
        assert_ne!(descending, ascending);
    }
}
