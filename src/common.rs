use crate::chain;
use std::fmt::{self, Write};
use std::num::{NonZeroU32, NonZeroUsize};
use std::str::FromStr;
pub use vec1::vec1;

/// Signed totals, table bounds and modifiers once applied.
pub type Int = i64;
/// A single die face.
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

/// Dice counts and selection counts.
pub type Num = NonZeroUsize;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// The number of faces on a die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sides {
    Poly(NonZeroUInt),
    Percentile,
}

impl Sides {
    pub const PERCENTILE_FACES: UInt = 100;

    const PERCENTILE: NonZeroUInt = match NonZeroUInt::new(Self::PERCENTILE_FACES) {
        Some(faces) => faces,
        None => panic!("percentile dice have faces"),
    };

    /// A polyhedral die; `None` for fewer than two faces.
    pub fn poly(faces: UInt) -> Option<Self> {
        if faces < 2 {
            None
        } else {
            NonZeroUInt::new(faces).map(Self::Poly)
        }
    }

    pub fn faces(self) -> NonZeroUInt {
        match self {
            Self::Poly(x) => x,
            Self::Percentile => Self::PERCENTILE,
        }
    }

    /// Moves this die along the die chain. Percentile dice and sizes off the
    /// chain never move.
    pub fn step(self, delta: i32) -> Self {
        match self {
            Self::Poly(x) => {
                let stepped = chain::step(x.get(), delta);
                NonZeroUInt::new(stepped).map_or(self, Self::Poly)
            }
            Self::Percentile => self,
        }
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poly(x) => fmt::Display::fmt(x, f),
            Self::Percentile => f.write_char('%'),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("invalid die size {0:?}: expected '%' or a number of at least 2")]
pub struct ParseSidesError(pub String);

impl FromStr for Sides {
    type Err = ParseSidesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "%" {
            return Ok(Self::Percentile);
        }
        s.parse::<UInt>()
            .ok()
            .and_then(Self::poly)
            .ok_or_else(|| ParseSidesError(s.to_string()))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    pub fn apply(self, x: Int) -> Int {
        match self {
            Self::Pos => x,
            Self::Neg => -x,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Pos => '+',
            Self::Neg => '-',
        };
        f.write_char(c)
    }
}

/// A flat amount added to or subtracted from the kept dice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Modifier {
    pub sign: Sign,
    pub value: UInt,
}

impl Modifier {
    pub const fn new(sign: Sign, value: UInt) -> Self {
        Self { sign, value }
    }

    pub fn apply(self, subtotal: Int) -> Int {
        subtotal + self.sign.apply(Int::from(self.value))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign, self.value)
    }
}
