use thiserror::Error;

use crate::{plate::Plate, unit::Unit};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Target weight must be a non-negative number, got {0}.")]
    InvalidTarget(f64),
    #[error("Target weight {target} is below the bar weight {bar}.")]
    BelowBar { target: f64, bar: f64 },
    #[error("No {0} plate in the {1} catalog.")]
    UnknownPlate(f64, Unit),
    #[error("Not enough {0} plates left for another pair.")]
    NoPairAvailable(Plate),
    #[error("Unknown bar '{0}'.")]
    UnknownBar(String),
    #[error("Please enter a bar name.")]
    EmptyBarName,
    #[error("Bar name must be {max} characters or less.")]
    BarNameTooLong { max: usize },
    #[error("A bar named '{0}' already exists.")]
    DuplicateBarName(String),
    #[error("Bar weight must be greater than {min} and at most {max}, got {weight}.")]
    BarWeightOutOfRange { weight: f64, min: f64, max: f64 },
}
