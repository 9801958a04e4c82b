use std::{fmt::Display, str::FromStr};

use crate::unit::Unit;

/// The fixed standard bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub enum BarKind {
    #[default]
    Men,
    Women,
    Zero,
}

impl BarKind {
    pub const ALL: [BarKind; 3] = [BarKind::Men, BarKind::Women, BarKind::Zero];

    /// Weight of this bar in `unit`. Standard bars have a native value in
    /// each unit system rather than a converted one.
    #[must_use]
    pub fn weight(self, unit: Unit) -> f64 {
        match (self, unit) {
            (BarKind::Men, Unit::Lbs) => 45.0,
            (BarKind::Men, Unit::Kg) => 20.0,
            (BarKind::Women, Unit::Lbs) => 33.0,
            (BarKind::Women, Unit::Kg) => 15.0,
            (BarKind::Zero, _) => 0.0,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            BarKind::Men => "men",
            BarKind::Women => "women",
            BarKind::Zero => "zero",
        }
    }

    #[must_use]
    pub fn display_name(self, unit: Unit) -> String {
        match self {
            BarKind::Men => format!("Men's Bar ({} {unit})", self.weight(unit)),
            BarKind::Women => format!("Women's Bar ({} {unit})", self.weight(unit)),
            BarKind::Zero => "No Bar (0)".to_string(),
        }
    }
}

impl Display for BarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarKind::Men => write!(f, "Men's Bar"),
            BarKind::Women => write!(f, "Women's Bar"),
            BarKind::Zero => write!(f, "No Bar"),
        }
    }
}

impl FromStr for BarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(BarKind::Men),
            "women" => Ok(BarKind::Women),
            "zero" => Ok(BarKind::Zero),
            _ => Err("Invalid bar kind.".to_string()),
        }
    }
}
