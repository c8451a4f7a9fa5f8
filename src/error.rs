use crate::{parse::ParseError, roll::RollError, table::TableError};

/// Any failure from parsing, rolling or table lookup.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Roll(#[from] RollError),
    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
