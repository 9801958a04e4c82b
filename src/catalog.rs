use itertools::Itertools;

use crate::{plate::Plate, unit::Unit};

/// How far a decimal weight may sit from a catalog weight and still name it.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Read-only rendering metadata for a plate denomination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlateStyle {
    /// Diameter in inches.
    pub diameter: f64,
    /// Thickness in inches.
    pub thickness: f64,
    pub color: &'static str,
    /// Whether labels on this plate need dark text to stay readable.
    pub dark_text: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogEntry {
    pub plate: Plate,
    pub style: PlateStyle,
}

const fn entry(
    weight: u32,
    unit: Unit,
    diameter: f64,
    thickness: f64,
    color: &'static str,
    dark_text: bool,
) -> CatalogEntry {
    CatalogEntry {
        plate: Plate::new(weight, unit),
        style: PlateStyle {
            diameter,
            thickness,
            color,
            dark_text,
        },
    }
}

const LBS_ENTRIES: [CatalogEntry; 7] = [
    entry(45_000, Unit::Lbs, 17.7, 2.2, "red", false),
    entry(35_000, Unit::Lbs, 14.1, 2.0, "blue", false),
    entry(25_000, Unit::Lbs, 10.9, 1.8, "yellow", true),
    entry(15_000, Unit::Lbs, 9.0, 1.4, "black", false),
    entry(10_000, Unit::Lbs, 9.0, 1.2, "green", false),
    entry(5_000, Unit::Lbs, 7.9, 1.0, "white", true),
    entry(2_500, Unit::Lbs, 6.5, 0.8, "#777", false),
];

const KG_ENTRIES: [CatalogEntry; 7] = [
    entry(25_000, Unit::Kg, 17.7, 2.2, "red", false),
    entry(20_000, Unit::Kg, 17.7, 2.0, "blue", false),
    entry(15_000, Unit::Kg, 15.7, 1.8, "yellow", true),
    entry(10_000, Unit::Kg, 12.6, 1.5, "green", false),
    entry(5_000, Unit::Kg, 9.0, 1.2, "white", true),
    entry(2_500, Unit::Kg, 7.5, 1.0, "#222", false),
    entry(1_250, Unit::Kg, 6.5, 0.8, "#555", false),
];

static LBS: PlateCatalog = PlateCatalog {
    unit: Unit::Lbs,
    entries: &LBS_ENTRIES,
};

static KG: PlateCatalog = PlateCatalog {
    unit: Unit::Kg,
    entries: &KG_ENTRIES,
};

/// The plates stocked for one unit system, heaviest first. The order is the
/// greedy search order and is never re-sorted.
#[derive(Debug)]
pub struct PlateCatalog {
    unit: Unit,
    entries: &'static [CatalogEntry],
}

impl PlateCatalog {
    #[must_use]
    pub fn for_unit(unit: Unit) -> &'static PlateCatalog {
        match unit {
            Unit::Lbs => &LBS,
            Unit::Kg => &KG,
        }
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn plates(&self) -> impl DoubleEndedIterator<Item = Plate> + '_ {
        self.entries.iter().map(|entry| entry.plate)
    }

    fn get(&self, milli: u32) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.plate.milli() == milli)
    }

    /// Looks up the catalog plate with exactly this decimal weight.
    #[must_use]
    pub fn find(&self, weight: f64) -> Option<Plate> {
        let plate = Plate::from_weight(weight, self.unit)?;
        self.get(plate.milli())
            .map(|entry| entry.plate)
            .filter(|plate| (plate.weight() - weight).abs() < WEIGHT_TOLERANCE)
    }

    #[must_use]
    pub fn style(&self, plate: Plate) -> Option<&PlateStyle> {
        if plate.unit() != self.unit {
            return None;
        }
        self.get(plate.milli()).map(|entry| &entry.style)
    }

    /// Strictly descending, positive and all in this catalog's unit.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.plates().all(|p| p.milli() > 0 && p.unit() == self.unit)
            && self.plates().tuple_windows().all(|(a, b)| a.milli() > b.milli())
    }
}
