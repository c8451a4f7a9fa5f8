use crate::common::Sides;
use crate::roll::Die;
use crate::session::{Roll, TableRoll};
use std::fmt::Display;

/// Renders rolls as text. Implementors override the pieces they style
/// differently.
pub trait Stringify {
    fn str_roll(&mut self, roll: &Roll) -> String {
        let head = self.str_expression(roll);
        let dice = self.str_dice(roll);
        let total = self.str_total(roll);
        format!("{} ({}) = {}", head, dice, total)
    }

    /// The expression as written, plus the die actually rolled when
    /// stepping moved it.
    fn str_expression(&mut self, roll: &Roll) -> String {
        let expr = &roll.expression;
        if expr.step() != 0 {
            format!("{} as d{}", expr, roll.result.resolved_sides())
        } else {
            expr.to_string()
        }
    }

    fn str_dice(&mut self, roll: &Roll) -> String {
        let sides = roll.result.resolved_sides();
        roll.result
            .dice()
            .iter()
            .map(|die| self.str_die(die, sides))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn str_die(&mut self, die: &Die, _sides: Sides) -> String {
        die.value.to_string()
    }

    fn str_total(&mut self, roll: &Roll) -> String {
        roll.total().to_string()
    }

    fn str_table_roll<T: Display>(&mut self, table_roll: &TableRoll<'_, T>) -> String {
        let roll = self.str_roll(&table_roll.roll);
        format!("{} → {}: {}", roll, table_roll.key, table_roll.payload)
    }

    /// One roll per line.
    fn str_rolls(&mut self, rolls: &[Roll]) -> String {
        rolls
            .iter()
            .map(|roll| self.str_roll(roll))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Chat markdown: dropped dice struck through, natural 1s and maxima in
/// bold, the total in backticks.
#[derive(Debug, Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_die(&mut self, die: &Die, sides: Sides) -> String {
        let value = if die.is_extreme(sides) {
            format!("**{}**", die.value)
        } else {
            die.value.to_string()
        };
        if die.kept {
            value
        } else {
            format!("~~{}~~", value)
        }
    }

    fn str_total(&mut self, roll: &Roll) -> String {
        format!("`{}`", roll.total())
    }
}
