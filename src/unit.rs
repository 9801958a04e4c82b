use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Lbs,
    Kg,
}

impl Unit {
    /// Kilograms in one pound.
    pub const KG_PER_LB: f64 = 0.453_592_37;

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Unit::Lbs => Unit::Kg,
            Unit::Kg => Unit::Lbs,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Lbs => write!(f, "lbs"),
            Unit::Kg => write!(f, "kg"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbs" | "lb" => Ok(Unit::Lbs),
            "kg" | "kgs" => Ok(Unit::Kg),
            _ => Err(format!("Invalid unit '{s}', expected lbs or kg.")),
        }
    }
}

/// Rounding granularity applied to cross-unit conversions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 0.5 lbs / 0.25 kg, matching the smallest practical gym increments.
    #[default]
    Standard,
    /// 0.1 of either unit.
    High,
}

impl Precision {
    /// Rounding steps per whole unit of `unit`.
    #[must_use]
    pub fn divisions(self, unit: Unit) -> f64 {
        match (self, unit) {
            (Precision::Standard, Unit::Lbs) => 2.0,
            (Precision::Standard, Unit::Kg) => 4.0,
            (Precision::High, _) => 10.0,
        }
    }

    /// Size of one rounding step in `unit`.
    #[must_use]
    pub fn step(self, unit: Unit) -> f64 {
        1.0 / self.divisions(unit)
    }

    #[must_use]
    pub fn from_high(high: bool) -> Self {
        if high {
            Precision::High
        } else {
            Precision::Standard
        }
    }

    #[must_use]
    pub fn is_high(self) -> bool {
        self == Precision::High
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::Standard => write!(f, "standard"),
            Precision::High => write!(f, "high"),
        }
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Ok(Precision::Standard),
            "high" => Ok(Precision::High),
            _ => Err(format!("Invalid precision '{s}', expected standard or high.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units_case_insensitively() {
        assert_eq!("LBS".parse::<Unit>(), Ok(Unit::Lbs));
        assert_eq!("lb".parse::<Unit>(), Ok(Unit::Lbs));
        assert_eq!("Kg".parse::<Unit>(), Ok(Unit::Kg));
        assert!("stone".parse::<Unit>().is_err());
    }

    #[test]
    fn unit_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Unit::Kg).unwrap(), "\"kg\"");
        assert_eq!(serde_json::from_str::<Unit>("\"lbs\"").unwrap(), Unit::Lbs);
    }

    #[test]
    fn standard_steps_differ_per_unit() {
        assert!((Precision::Standard.step(Unit::Lbs) - 0.5).abs() < f64::EPSILON);
        assert!((Precision::Standard.step(Unit::Kg) - 0.25).abs() < f64::EPSILON);
        assert!((Precision::High.step(Unit::Kg) - 0.1).abs() < f64::EPSILON);
    }
}
