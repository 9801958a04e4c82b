use std::collections::BTreeMap;

use crate::{catalog::PlateCatalog, loadout::Loadout, plate::Plate, unit::Unit};

/// Upper bound for the count of any denomination.
pub const MAX_INVENTORY: u32 = 999;

/// Starting count for every denomination in a fresh ledger.
pub const DEFAULT_INVENTORY: u32 = 99;

/// Plates physically on hand, per unit system and denomination.
///
/// Only [`InventoryLedger::set_count`] mutates it. The calculator works on a
/// [`InventoryLedger::stock`] copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryLedger {
    counts: BTreeMap<Plate, u32>,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::filled(DEFAULT_INVENTORY)
    }
}

impl InventoryLedger {
    /// A ledger with no plates at all.
    #[must_use]
    pub fn empty() -> Self {
        InventoryLedger {
            counts: BTreeMap::new(),
        }
    }

    /// Every catalog denomination in both units set to `count`.
    #[must_use]
    pub fn filled(count: u32) -> Self {
        let mut ledger = Self::empty();
        for unit in [Unit::Lbs, Unit::Kg] {
            for plate in PlateCatalog::for_unit(unit).plates() {
                ledger.set_count(plate, i64::from(count));
            }
        }
        ledger
    }

    #[must_use]
    pub fn count(&self, plate: Plate) -> u32 {
        self.counts.get(&plate).copied().unwrap_or(0)
    }

    /// Sets the on-hand count, clamped into `[0, MAX_INVENTORY]`, and returns
    /// the stored value. Mounted plates are left alone even when the new
    /// count is below what is on the bar.
    pub fn set_count(&mut self, plate: Plate, count: i64) -> u32 {
        let clamped = u32::try_from(count.clamp(0, i64::from(MAX_INVENTORY))).unwrap_or(0);
        self.counts.insert(plate, clamped);
        clamped
    }

    /// Plates of this denomination not mounted on the bar. A further pair can
    /// be added only while this is at least 2. Negative when the count was
    /// shrunk below what is mounted.
    #[must_use]
    pub fn available_pairs(&self, plate: Plate, loadout: &Loadout) -> i64 {
        let mounted = i64::try_from(loadout.occurrences(plate)).unwrap_or(i64::MAX / 2);
        i64::from(self.count(plate)) - 2 * mounted
    }

    /// Working copy of the counts for one unit system.
    #[must_use]
    pub fn stock(&self, unit: Unit) -> BTreeMap<Plate, u32> {
        self.counts
            .iter()
            .filter(|(plate, _)| plate.unit() == unit)
            .map(|(plate, count)| (*plate, *count))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plate, u32)> + '_ {
        self.counts.iter().map(|(plate, count)| (*plate, *count))
    }
}
