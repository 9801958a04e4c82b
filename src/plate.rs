use std::fmt::Display;

use crate::unit::Unit;

/// Milli-units per whole unit. Plate weights are stored scaled by this so
/// they can be compared and used as keys without floating-point drift.
pub const MILLI: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Plate {
    weight: u32,
    unit: Unit,
}

impl Plate {
    #[must_use]
    pub const fn new(weight: u32, unit: Unit) -> Self {
        Plate { weight, unit }
    }

    /// Builds a plate from a decimal weight, or `None` for non-finite or
    /// non-positive input.
    #[must_use]
    pub fn from_weight(weight: f64, unit: Unit) -> Option<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return None;
        }
        let scaled = (weight * f64::from(MILLI)).round();
        if scaled > f64::from(u32::MAX) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(Plate::new(scaled as u32, unit))
    }

    /// Weight in milli-units.
    #[must_use]
    pub fn milli(&self) -> u32 {
        self.weight
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        f64::from(self.weight) / f64::from(MILLI)
    }

    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// Formats a decimal weight without trailing zeros ("45", "2.5", "1.25").
#[must_use]
pub fn format_weight(weight: f64) -> String {
    let text = format!("{weight:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", format_weight(self.weight()), self.unit)
    }
}
