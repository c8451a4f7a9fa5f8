use super::select::{Select, Selection};
use crate::common::*;

/// One rolled die and whether it counts toward the total.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Die {
    pub value: UInt,
    pub kept: bool,
}

impl Die {
    /// A natural 1 or the die's maximum face.
    pub fn is_extreme(&self, sides: Sides) -> bool {
        self.value == 1 || self.value == sides.faces().get()
    }
}

/// The outcome of evaluating one dice expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RolledSet {
    dice: NonEmpty<Die>,
    sides: Sides,
    subtotal: Int,
    total: Int,
}

impl RolledSet {
    /// Applies `selection` and `modifier` to rolls made on `sides`.
    pub fn new(
        rolls: NonEmpty<UInt>,
        sides: Sides,
        selection: &Selection,
        modifier: Option<Modifier>,
    ) -> Self {
        let mut flags = selection.select(rolls.as_slice()).into_iter();
        let dice = rolls.mapped(|value| Die {
            value,
            kept: flags.next().unwrap_or(true),
        });

        let subtotal = dice
            .iter()
            .filter(|die| die.kept)
            .map(|die| Int::from(die.value))
            .sum();
        let total = modifier.map_or(subtotal, |m| m.apply(subtotal));

        Self {
            dice,
            sides,
            subtotal,
            total,
        }
    }

    /// Every die in roll order, kept or not.
    pub fn dice(&self) -> &[Die] {
        self.dice.as_slice()
    }

    pub fn raw_rolls(&self) -> Vec<UInt> {
        self.dice.iter().map(|die| die.value).collect()
    }

    pub fn kept_rolls(&self) -> Vec<UInt> {
        self.dice.iter().filter(|die| die.kept).map(|die| die.value).collect()
    }

    pub fn dropped_rolls(&self) -> Vec<UInt> {
        self.dice.iter().filter(|die| !die.kept).map(|die| die.value).collect()
    }

    /// Sum of the kept dice.
    pub fn subtotal(&self) -> Int {
        self.subtotal
    }

    /// The subtotal with the flat modifier applied.
    pub fn total(&self) -> Int {
        self.total
    }

    /// The die size actually rolled, after chain steps.
    pub fn resolved_sides(&self) -> Sides {
        self.sides
    }
}
