use crate::chain;
use crate::common::*;
use crate::roll::Selection;
use std::fmt;

/// A single parsed dice expression such as `4d6dl1` or `1d20+d+3`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceExpression {
    count: Num,
    sides: Sides,
    step: i32,
    selection: Selection,
    modifier: Option<Modifier>,
}

impl DiceExpression {
    pub fn new(count: Num, sides: Sides) -> Self {
        Self {
            count,
            sides,
            step: 0,
            selection: Selection::default(),
            modifier: None,
        }
    }

    /// Sets the net number of die-chain steps, clamped to
    /// [chain::MAX_STEPS](crate::chain::MAX_STEPS) either way.
    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step.clamp(-chain::MAX_STEPS, chain::MAX_STEPS);
        self
    }

    pub fn with_selection(mut self, selection: impl Into<Selection>) -> Self {
        self.selection = selection.into();
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn count(&self) -> Num {
        self.count
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn modifier(&self) -> Option<Modifier> {
        self.modifier
    }

    /// The die that is actually rolled once chain steps are applied.
    pub fn resolved_sides(&self) -> Sides {
        self.sides.step(self.step)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.step > 0 {
            write!(f, "+d{}", self.step)?;
        } else if self.step < 0 {
            write!(f, "-d{}", self.step.unsigned_abs())?;
        }
        write!(f, "{}", self.selection)?;
        if let Some(modifier) = self.modifier {
            write!(f, "{}", modifier)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DiceExpression {
    type Err = super::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}
