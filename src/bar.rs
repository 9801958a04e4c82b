use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    bar_kind::BarKind,
    convert::convert,
    session_error::SessionError,
    unit::{Precision, Unit},
};

pub const MAX_BAR_NAME_LEN: usize = 20;
/// Custom bar weights must be strictly above this.
pub const MIN_CUSTOM_BAR_WEIGHT: f64 = 0.1;
pub const MAX_CUSTOM_BAR_WEIGHT: f64 = 1000.0;

const CUSTOM_PREFIX: &str = "custom-";

/// Which bar is selected: a standard one or a custom bar by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BarSelection {
    Standard(BarKind),
    Custom(String),
}

impl Default for BarSelection {
    fn default() -> Self {
        BarSelection::Standard(BarKind::default())
    }
}

impl BarSelection {
    /// Parses a stored id. Anything that is neither a standard id nor a
    /// custom id is `None`.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        if let Ok(kind) = id.parse::<BarKind>() {
            return Some(BarSelection::Standard(kind));
        }
        id.starts_with(CUSTOM_PREFIX)
            .then(|| BarSelection::Custom(id.to_string()))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            BarSelection::Standard(kind) => kind.id(),
            BarSelection::Custom(id) => id,
        }
    }
}

impl Display for BarSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A user-defined bar. The weight stays in the unit it was created in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomBar {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub unit: Unit,
}

impl CustomBar {
    /// Validates user input and builds a bar with a fresh id.
    ///
    /// # Errors
    /// If the name is empty, too long or already taken (ignoring case), or
    /// the weight is outside `(MIN_CUSTOM_BAR_WEIGHT, MAX_CUSTOM_BAR_WEIGHT]`.
    pub fn create(
        name: &str,
        weight: f64,
        unit: Unit,
        existing: &[CustomBar],
    ) -> Result<Self, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyBarName);
        }
        if name.chars().count() > MAX_BAR_NAME_LEN {
            return Err(SessionError::BarNameTooLong {
                max: MAX_BAR_NAME_LEN,
            });
        }
        let lowered = name.to_lowercase();
        if existing.iter().any(|bar| bar.name.to_lowercase() == lowered) {
            return Err(SessionError::DuplicateBarName(name.to_string()));
        }
        if !weight.is_finite() || weight <= MIN_CUSTOM_BAR_WEIGHT || weight > MAX_CUSTOM_BAR_WEIGHT
        {
            return Err(SessionError::BarWeightOutOfRange {
                weight,
                min: MIN_CUSTOM_BAR_WEIGHT,
                max: MAX_CUSTOM_BAR_WEIGHT,
            });
        }

        Ok(CustomBar {
            id: format!("{CUSTOM_PREFIX}{}", Uuid::new_v4()),
            name: name.to_string(),
            weight,
            unit,
        })
    }

    #[must_use]
    pub fn weight_in(&self, unit: Unit, precision: Precision) -> f64 {
        convert(self.weight, self.unit, unit, precision)
    }
}

/// A selection resolved against the current unit and precision.
#[derive(Clone, Debug, PartialEq)]
pub struct BarSpec {
    pub selection: BarSelection,
    pub native_weight: f64,
    pub native_unit: Unit,
    pub display_name: String,
}

impl BarSpec {
    #[must_use]
    pub fn standard(kind: BarKind, unit: Unit) -> Self {
        BarSpec {
            selection: BarSelection::Standard(kind),
            native_weight: kind.weight(unit),
            native_unit: unit,
            display_name: kind.display_name(unit),
        }
    }

    #[must_use]
    pub fn custom(bar: &CustomBar, unit: Unit, precision: Precision) -> Self {
        BarSpec {
            selection: BarSelection::Custom(bar.id.clone()),
            native_weight: bar.weight,
            native_unit: bar.unit,
            display_name: format!("{} ({:.1} {unit})", bar.name, bar.weight_in(unit, precision)),
        }
    }

    /// Resolves `selection`, or `None` when it names a custom bar that no
    /// longer exists.
    #[must_use]
    pub fn resolve(
        selection: &BarSelection,
        custom_bars: &[CustomBar],
        unit: Unit,
        precision: Precision,
    ) -> Option<Self> {
        match selection {
            BarSelection::Standard(kind) => Some(Self::standard(*kind, unit)),
            BarSelection::Custom(id) => custom_bars
                .iter()
                .find(|bar| &bar.id == id)
                .map(|bar| Self::custom(bar, unit, precision)),
        }
    }

    /// Bar weight expressed in `unit`.
    #[must_use]
    pub fn weight_in(&self, unit: Unit, precision: Precision) -> f64 {
        convert(self.native_weight, self.native_unit, unit, precision)
    }
}
