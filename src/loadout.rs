use std::fmt::Display;

use itertools::Itertools;

use crate::plate::{format_weight, Plate};

/// Plates mounted on one side of the bar, heaviest first. Every plate stands
/// for a matched pair, one per side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    plates: Vec<Plate>,
}

impl Loadout {
    #[must_use]
    pub fn new(plates: Vec<Plate>) -> Self {
        Loadout {
            plates: plates.into_iter().sorted_by(|a, b| b.cmp(a)).collect(),
        }
    }

    #[must_use]
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plates.len()
    }

    /// Mounts a pair, keeping the heaviest-first order.
    pub fn push(&mut self, plate: Plate) {
        let at = self.plates.partition_point(|mounted| *mounted >= plate);
        self.plates.insert(at, plate);
    }

    /// Unmounts one pair of `plate`. Returns false when none is mounted.
    pub fn remove(&mut self, plate: Plate) -> bool {
        match self.plates.iter().position(|mounted| *mounted == plate) {
            Some(index) => {
                self.plates.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.plates.clear();
    }

    #[must_use]
    pub fn occurrences(&self, plate: Plate) -> usize {
        self.plates.iter().filter(|mounted| **mounted == plate).count()
    }

    /// Total plate weight on one side.
    #[must_use]
    pub fn side_weight(&self) -> f64 {
        let milli: u64 = self.plates.iter().map(|p| u64::from(p.milli())).sum();
        #[allow(clippy::cast_precision_loss)]
        let side = milli as f64 / 1000.0;
        side
    }

    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.plates.iter().map(Plate::weight).collect()
    }
}

impl Display for Loadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.plates.is_empty() {
            return write!(f, "(empty)");
        }
        let weights = self
            .plates
            .iter()
            .map(|p| format_weight(p.weight()))
            .join(", ");
        write!(f, "[{weights}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    fn lbs(weight: f64) -> Plate {
        Plate::from_weight(weight, Unit::Lbs).unwrap()
    }

    #[test]
    fn push_keeps_heaviest_first() {
        let mut loadout = Loadout::new(vec![lbs(10.0), lbs(45.0)]);
        loadout.push(lbs(25.0));
        loadout.push(lbs(2.5));
        loadout.push(lbs(45.0));
        assert_eq!(loadout.weights(), vec![45.0, 45.0, 25.0, 10.0, 2.5]);
    }

    #[test]
    fn remove_takes_a_single_pair() {
        let mut loadout = Loadout::new(vec![lbs(45.0), lbs(45.0), lbs(5.0)]);
        assert!(loadout.remove(lbs(45.0)));
        assert_eq!(loadout.occurrences(lbs(45.0)), 1);
        assert!(!loadout.remove(lbs(35.0)));
        assert_eq!(loadout.len(), 2);
    }

    #[test]
    fn side_weight_sums_fractional_plates() {
        let loadout = Loadout::new(vec![lbs(2.5), lbs(2.5), lbs(45.0)]);
        assert!((loadout.side_weight() - 50.0).abs() < f64::EPSILON);
        assert_eq!(loadout.to_string(), "[45, 2.5, 2.5]");
        assert_eq!(Loadout::default().to_string(), "(empty)");
    }
}
