use crate::unit::{Precision, Unit};

/// Rounds to the nearest `1 / divisions`, ties going up.
#[must_use]
pub fn round_half_up(value: f64, divisions: f64) -> f64 {
    (value * divisions + 0.5).floor() / divisions
}

/// Converts `value` from one unit to another, rounding cross-unit results to
/// the granularity of `precision` in the target unit.
///
/// Same-unit conversion is an exact passthrough. NaN and negative inputs are
/// not clamped.
#[must_use]
pub fn convert(value: f64, from: Unit, to: Unit, precision: Precision) -> f64 {
    let raw = match (from, to) {
        (Unit::Lbs, Unit::Kg) => value * Unit::KG_PER_LB,
        (Unit::Kg, Unit::Lbs) => value / Unit::KG_PER_LB,
        _ => return value,
    };

    round_half_up(raw, precision.divisions(to))
}
