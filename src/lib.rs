//! A dice-notation engine: parse expressions like `4d6dl1` or `1d20+d1+5`,
//! roll them with keep/drop selection and die-chain stepping, and look the
//! totals up in range tables.
//!
//! ```no_run
//! let roll = dice_chain::roll("2d20kh1+5")?;
//! println!("{}", roll.total());
//! # Ok::<(), dice_chain::Error>(())
//! ```

pub mod chain;
pub mod common;
pub mod config;
mod error;
pub mod parse;
pub mod roll;
pub mod session;
pub mod stringify;
pub mod table;

pub use config::RollConfig;
pub use error::{Error, Result};
pub use parse::ast::DiceExpression;
pub use roll::{ReplayRoller, RollContext, RolledSet, Roller};
pub use session::{roll_line, roll_on_table, split_expressions, Roll, TableRoll};
pub use table::{RangeKey, RangeTable};

/// Parses a single dice expression.
pub fn parse(text: &str) -> Result<DiceExpression> {
    Ok(parse::parse(text)?)
}

/// Parses and rolls `text` with the thread RNG and the default roll budget.
pub fn roll(text: &str) -> Result<Roll> {
    RollContext::default().roll_expression(text)
}
