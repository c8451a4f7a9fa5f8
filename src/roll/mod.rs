mod ctx;
mod error;
mod rolled;
mod roller;
mod select;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext};
pub use error::RollError;
pub use rolled::{Die, RolledSet};
pub use roller::{ReplayRoller, Roller};
pub use select::{DropLowest, KeepAll, KeepHighest, KeepLowest, Select, Selection};

#[cfg(test)]
pub(crate) use roller::StepRoller;
