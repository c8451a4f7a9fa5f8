use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled: {requested} would exceed the limit of {max}")]
    TooManyRolls { requested: usize, max: usize },
}
