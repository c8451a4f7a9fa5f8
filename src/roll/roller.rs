use crate::common::{NonEmpty, NonZeroUInt, UInt};
use rand::Rng;

/// A source of uniform die rolls.
pub trait Roller {
    /// A value in `1..=sides`.
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }
}

/// Replays a recorded sequence of draws, starting over once it runs out.
///
/// Each draw is reduced into `1..=sides` for the die being rolled, so a
/// recording made on a d20 can still drive a d6.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReplayRoller {
    draws: NonEmpty<UInt>,
    next: usize,
}

impl ReplayRoller {
    pub fn new(draws: NonEmpty<UInt>) -> Self {
        Self { draws, next: 0 }
    }

    /// `None` when `draws` is empty.
    pub fn try_from_vec(draws: Vec<UInt>) -> Option<Self> {
        NonEmpty::try_from_vec(draws).ok().map(Self::new)
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl Roller for ReplayRoller {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        (draw.max(1) - 1) % sides.get() + 1
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
