use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    bar::{BarSelection, CustomBar},
    catalog::PlateCatalog,
    ledger::InventoryLedger,
    loadout::Loadout,
    plate::format_weight,
    session::Session,
    unit::{Precision, Unit},
};

/// Inventory counts keyed by the plate weight as written ("45", "2.5").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySnapshot {
    pub lbs: BTreeMap<String, i64>,
    pub kg: BTreeMap<String, i64>,
}

impl InventorySnapshot {
    fn for_unit(&self, unit: Unit) -> &BTreeMap<String, i64> {
        match unit {
            Unit::Lbs => &self.lbs,
            Unit::Kg => &self.kg,
        }
    }

    fn for_unit_mut(&mut self, unit: Unit) -> &mut BTreeMap<String, i64> {
        match unit {
            Unit::Lbs => &mut self.lbs,
            Unit::Kg => &mut self.kg,
        }
    }
}

/// Flat persisted form of a [`Session`]. Missing fields take their defaults
/// and unknown fields are ignored, so older saved states still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub unit: Unit,
    pub bar: String,
    pub plates: Vec<f64>,
    pub inventory: InventorySnapshot,
    pub custom_bars: Vec<CustomBar>,
    pub high_precision: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::from(&Session::default())
    }
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        let mut inventory = InventorySnapshot::default();
        for (plate, count) in session.ledger().iter() {
            inventory
                .for_unit_mut(plate.unit())
                .insert(format_weight(plate.weight()), i64::from(count));
        }

        Snapshot {
            unit: session.unit(),
            bar: session.selection().id().to_string(),
            plates: session.loadout().weights(),
            inventory,
            custom_bars: session.custom_bars().to_vec(),
            high_precision: session.precision().is_high(),
        }
    }
}

impl Snapshot {
    /// Rebuilds a session, dropping anything that does not fit the catalogs
    /// and healing a stale bar selection. The flag is true when something
    /// had to be corrected, so the caller should write the session back.
    #[must_use]
    pub fn into_session(self) -> (Session, bool) {
        let unit = self.unit;
        let catalog = PlateCatalog::for_unit(unit);
        let mut repaired = false;

        let mut ledger = InventoryLedger::default();
        for unit in [Unit::Lbs, Unit::Kg] {
            let catalog = PlateCatalog::for_unit(unit);
            for (key, count) in self.inventory.for_unit(unit) {
                match key.parse::<f64>().ok().and_then(|w| catalog.find(w)) {
                    Some(plate) => {
                        let stored = ledger.set_count(plate, *count);
                        repaired |= i64::from(stored) != *count;
                    }
                    None => {
                        warn!(%unit, weight = %key, "ignoring unknown inventory entry");
                        repaired = true;
                    }
                }
            }
        }

        let mut plates = Vec::with_capacity(self.plates.len());
        for weight in self.plates {
            match catalog.find(weight) {
                Some(plate) => plates.push(plate),
                None => {
                    warn!(%unit, weight, "ignoring unknown mounted plate");
                    repaired = true;
                }
            }
        }

        let bar = BarSelection::parse(&self.bar).unwrap_or_else(|| {
            warn!(bar = %self.bar, "invalid bar type, resetting to default");
            repaired = true;
            BarSelection::default()
        });

        let mut session = Session {
            unit,
            bar,
            loadout: Loadout::new(plates),
            ledger,
            precision: Precision::from_high(self.high_precision),
            custom_bars: self.custom_bars,
        };
        repaired |= session.heal_selection();
        (session, repaired)
    }
}

impl From<Snapshot> for Session {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.into_session().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bar_kind::BarKind, ledger::DEFAULT_INVENTORY, plate::Plate};

    #[test]
    fn default_snapshot_matches_default_session() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.unit, Unit::Lbs);
        assert_eq!(snapshot.bar, "men");
        assert!(snapshot.plates.is_empty());
        assert_eq!(snapshot.inventory.lbs.get("2.5"), Some(&i64::from(DEFAULT_INVENTORY)));
        assert_eq!(snapshot.inventory.kg.get("1.25"), Some(&i64::from(DEFAULT_INVENTORY)));
        assert_eq!(Session::from(snapshot), Session::default());
    }

    #[test]
    fn reads_saved_browser_state() {
        let json = r#"{
            "unit": "kg",
            "bar": "women",
            "theme": "dark",
            "plates": [20, 2.5, 1.25],
            "inventory": { "kg": { "20": 4, "2.5": 1200, "1.25": -1 } },
            "customBars": [],
            "highPrecision": true
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let (session, repaired) = snapshot.into_session();

        assert!(repaired);
        assert_eq!(session.unit(), Unit::Kg);
        assert_eq!(session.selection(), &BarSelection::Standard(BarKind::Women));
        assert_eq!(session.loadout().weights(), vec![20.0, 2.5, 1.25]);
        assert_eq!(session.precision(), Precision::High);
        assert_eq!(session.ledger().count(Plate::new(20_000, Unit::Kg)), 4);
        assert_eq!(session.ledger().count(Plate::new(2_500, Unit::Kg)), 999);
        assert_eq!(session.ledger().count(Plate::new(1_250, Unit::Kg)), 0);
        assert_eq!(session.ledger().count(Plate::new(45_000, Unit::Lbs)), DEFAULT_INVENTORY);
    }

    #[test]
    fn drops_what_does_not_fit() {
        let json = r#"{ "plates": [45, 44, 2.5], "bar": "custom-deleted", "inventory": { "lbs": { "7": 3 } } }"#;
        let (session, repaired) = serde_json::from_str::<Snapshot>(json).unwrap().into_session();

        assert!(repaired);
        assert_eq!(session.loadout().weights(), vec![45.0, 2.5]);
        assert_eq!(session.selection(), &BarSelection::default());
        assert_eq!(session.ledger(), &InventoryLedger::default());
    }

    #[test]
    fn round_trips_through_json() {
        let mut session = Session::default();
        let id = session.add_custom_bar("Axle", 25.0, Unit::Kg).unwrap().id.clone();
        session.select_bar(&id).unwrap();
        session.add_plate(2.5).unwrap();
        session.set_inventory(Unit::Kg, 1.25, 6).unwrap();

        let json = serde_json::to_string(&Snapshot::from(&session)).unwrap();
        assert!(json.contains("\"customBars\""));
        let (restored, repaired) = serde_json::from_str::<Snapshot>(&json).unwrap().into_session();
        assert!(!repaired);
        assert_eq!(restored, session);
    }

    #[test]
    fn stale_custom_bar_is_reported() {
        let json = r#"{ "bar": "custom-gone", "plates": [45] }"#;
        let (session, repaired) = serde_json::from_str::<Snapshot>(json).unwrap().into_session();

        assert!(repaired);
        assert_eq!(session.selection().id(), "men");
        assert_eq!(Snapshot::from(&session).bar, "men");
    }

    #[test]
    fn near_miss_plate_weights_are_dropped() {
        let json = r#"{ "plates": [2.4996, 2.5004, 45], "inventory": { "lbs": { "2.4996": 3 } } }"#;
        let (session, repaired) = serde_json::from_str::<Snapshot>(json).unwrap().into_session();

        assert!(repaired);
        assert_eq!(session.loadout().weights(), vec![45.0]);
        assert_eq!(session.ledger().count(Plate::new(2_500, Unit::Lbs)), DEFAULT_INVENTORY);
    }
}
