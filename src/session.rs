//! Rolling whole lines of input and rolling against tables.

use crate::common::Int;
use crate::error::Result;
use crate::parse::{self, ast::DiceExpression};
use crate::roll::{RollContext, RolledSet, Roller};
use crate::table::{RangeKey, RangeTable};

/// An expression and what it rolled.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Roll {
    pub expression: DiceExpression,
    pub result: RolledSet,
}

impl Roll {
    pub fn total(&self) -> Int {
        self.result.total()
    }
}

/// A roll and the table entry its total landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRoll<'t, T> {
    pub roll: Roll,
    pub key: &'t RangeKey,
    pub payload: &'t T,
}

/// Splits a line like `"1d20+5, 2d6"` into its expressions.
pub fn split_expressions(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

impl<R: Roller> RollContext<R> {
    /// Parses and rolls a single expression.
    pub fn roll_expression(&mut self, text: &str) -> Result<Roll> {
        let expression = parse::parse(text)?;
        let result = self.eval(&expression)?;
        Ok(Roll { expression, result })
    }
}

/// Rolls every expression on the line, in order. Nothing is returned if any
/// expression fails.
pub fn roll_line<R: Roller>(ctx: &mut RollContext<R>, line: &str) -> Result<Vec<Roll>> {
    split_expressions(line)
        .into_iter()
        .map(|text| ctx.roll_expression(text))
        .collect()
}

/// Rolls `text` and looks its total up in `table`.
pub fn roll_on_table<'t, R: Roller, T>(
    ctx: &mut RollContext<R>,
    text: &str,
    table: &'t RangeTable<T>,
) -> Result<TableRoll<'t, T>> {
    let roll = ctx.roll_expression(text)?;
    let (key, payload) = table.resolve(roll.total())?;
    Ok(TableRoll { roll, key, payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UInt;
    use crate::roll::{ReplayRoller, RollError};
    use crate::table::TableError;
    use crate::Error;

    fn ctx(draws: Vec<UInt>) -> RollContext<ReplayRoller> {
        RollContext::new_unbounded(ReplayRoller::try_from_vec(draws).unwrap())
    }

    #[test]
    fn test_split_expressions() {
        assert_eq!(split_expressions("1d20+5, 2d6  4d6dl1"), ["1d20+5", "2d6", "4d6dl1"]);
        assert_eq!(split_expressions(" ,, "), Vec::<&str>::new());
        assert_eq!(split_expressions("d8"), ["d8"]);
    }

    #[test]
    fn test_roll_line() {
        let rolls = roll_line(&mut ctx(vec![12, 3, 4]), "d20+1, 2d6").unwrap();
        let totals: Vec<_> = rolls.iter().map(Roll::total).collect();
        assert_eq!(totals, [13, 7]);
        assert_eq!(rolls[1].expression.to_string(), "2d6");
    }

    #[test]
    fn test_roll_line_first_error_aborts() {
        let err = roll_line(&mut ctx(vec![1]), "d20 0d6 d4").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let mut bounded = RollContext::new_bounded(3, ReplayRoller::try_from_vec(vec![1]).unwrap());
        let err = roll_line(&mut bounded, "2d6 2d6").unwrap_err();
        assert_eq!(err, Error::Roll(RollError::TooManyRolls { requested: 4, max: 3 }));
    }

    #[test]
    fn test_roll_on_table() {
        let table = RangeTable::new([("1", "fumble"), ("2-19", "hit"), ("20", "crit")]).unwrap();

        let hit = roll_on_table(&mut ctx(vec![11]), "1d20", &table).unwrap();
        assert_eq!(hit.roll.total(), 11);
        assert_eq!(hit.key.label(), "2-19");
        assert_eq!(*hit.payload, "hit");

        let err = roll_on_table(&mut ctx(vec![20]), "1d20+3", &table).unwrap_err();
        assert_eq!(err, Error::Table(TableError::NoMatch(23)));
    }
}
