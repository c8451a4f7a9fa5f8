use crate::common::{Num, UInt};
use std::fmt;

/// Chooses which dice of a roll count toward the total.
#[enum_dispatch::enum_dispatch]
pub trait Select {
    /// Returns one flag per roll, in roll order; `true` means the die is kept.
    /// At least one die is always kept.
    fn select(&self, rolls: &[UInt]) -> Vec<bool>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[enum_dispatch::enum_dispatch(Select)]
pub enum Selection {
    KeepAll(KeepAll),
    KeepHighest(KeepHighest),
    KeepLowest(KeepLowest),
    DropLowest(DropLowest),
}

impl Selection {
    /// The selector argument, or `None` for [KeepAll].
    pub fn count(&self) -> Option<Num> {
        match *self {
            Self::KeepAll(_) => None,
            Self::KeepHighest(KeepHighest(n)) | Self::KeepLowest(KeepLowest(n)) | Self::DropLowest(DropLowest(n)) => {
                Some(n)
            }
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::KeepAll(KeepAll)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepAll(x) => fmt::Display::fmt(x, f),
            Self::KeepHighest(x) => fmt::Display::fmt(x, f),
            Self::KeepLowest(x) => fmt::Display::fmt(x, f),
            Self::DropLowest(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KeepAll;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KeepHighest(pub Num);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KeepLowest(pub Num);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DropLowest(pub Num);

impl Select for KeepAll {
    fn select(&self, rolls: &[UInt]) -> Vec<bool> {
        vec![true; rolls.len()]
    }
}

impl Select for KeepHighest {
    fn select(&self, rolls: &[UInt]) -> Vec<bool> {
        let keep = self.0.get().min(rolls.len());
        let order = ascending(rolls);
        mark(rolls.len(), &order[order.len() - keep..])
    }
}

impl Select for KeepLowest {
    fn select(&self, rolls: &[UInt]) -> Vec<bool> {
        let keep = self.0.get().min(rolls.len());
        mark(rolls.len(), &ascending(rolls)[..keep])
    }
}

impl Select for DropLowest {
    fn select(&self, rolls: &[UInt]) -> Vec<bool> {
        let drop = self.0.get().min(rolls.len().saturating_sub(1));
        mark(rolls.len(), &ascending(rolls)[drop..])
    }
}

impl fmt::Display for KeepAll {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl fmt::Display for KeepHighest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kh{}", self.0)
    }
}

impl fmt::Display for KeepLowest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kl{}", self.0)
    }
}

impl fmt::Display for DropLowest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dl{}", self.0)
    }
}

/// Roll indices ordered by value. Equal values keep roll order.
fn ascending(rolls: &[UInt]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rolls.len()).collect();
    order.sort_by_key(|&i| rolls[i]);
    order
}

fn mark(len: usize, kept: &[usize]) -> Vec<bool> {
    let mut flags = vec![false; len];
    for &i in kept {
        flags[i] = true;
    }
    flags
}
