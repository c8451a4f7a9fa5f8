use super::TableError;
use crate::common::Int;
use logos::Logos;
use std::fmt;
use std::str::FromStr;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
enum KeyToken {
    #[regex(r"[0-9]+")]
    Integer,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("or")]
    Or,
    #[token("lower")]
    Lower,

    #[regex(r"[ \t]+", logos::skip)]
    #[error]
    Error,
}

/// A parsed table key: a range of totals, open on at most one side.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RangeKey {
    lower: Option<Int>,
    upper: Option<Int>,
    label: String,
}

impl RangeKey {
    /// A key over `lower..=upper`, labelled with its canonical text. Bounds
    /// given out of order are swapped.
    pub fn new(lower: Option<Int>, upper: Option<Int>) -> Result<Self, TableError> {
        let (lower, upper) = match (lower, upper) {
            (None, None) => return Err(TableError::Unbounded),
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            bounds => bounds,
        };
        let mut key = Self {
            lower,
            upper,
            label: String::new(),
        };
        key.label = key.to_string();
        Ok(key)
    }

    pub fn exact(value: Int) -> Self {
        Self::bounded(value, value)
    }

    pub fn bounded(a: Int, b: Int) -> Self {
        let mut key = Self {
            lower: Some(a.min(b)),
            upper: Some(a.max(b)),
            label: String::new(),
        };
        key.label = key.to_string();
        key
    }

    /// Parses one of `N`, `N-M`, `N+` or `N or lower`.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let invalid = || TableError::InvalidKey {
            key: text.to_string(),
        };
        let mut lexer = KeyToken::lexer(text);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            let value = match token {
                KeyToken::Integer => Some(lexer.slice().parse::<Int>().map_err(|_| invalid())?),
                KeyToken::Error => return Err(invalid()),
                _ => None,
            };
            tokens.push((token, value, lexer.span()));
        }

        use KeyToken::*;
        let (lower, upper) = match tokens.as_slice() {
            [(Integer, Some(a), _)] => (Some(*a), Some(*a)),
            [(Integer, Some(a), _), (Plus, ..)] => (Some(*a), None),
            // Words must stand apart: "1 or lower", never "1orlower".
            [(Integer, Some(a), num), (Or, _, or), (Lower, _, lower)]
                if num.end < or.start && or.end < lower.start =>
            {
                (None, Some(*a))
            }
            [(Integer, Some(a), _), (Minus, ..), (Integer, Some(b), _)] => {
                (Some(*a.min(b)), Some(*a.max(b)))
            }
            _ => return Err(invalid()),
        };
        Ok(Self {
            lower,
            upper,
            label: text.to_string(),
        })
    }

    pub fn lower(&self) -> Option<Int> {
        self.lower
    }

    pub fn upper(&self) -> Option<Int> {
        self.upper
    }

    /// The text the key was parsed from.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn contains(&self, total: Int) -> bool {
        self.lower.map_or(true, |lo| lo <= total) && self.upper.map_or(true, |hi| total <= hi)
    }

    /// Bounds with open sides widened to the integer limits; tables sort on
    /// this pair.
    pub fn sort_key(&self) -> (Int, Int) {
        (self.lower.unwrap_or(Int::MIN), self.upper.unwrap_or(Int::MAX))
    }

    pub fn overlaps(&self, other: &RangeKey) -> bool {
        let (a_lo, a_hi) = self.sort_key();
        let (b_lo, b_hi) = other.sort_key();
        a_lo.max(b_lo) <= a_hi.min(b_hi)
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Some(lo), Some(hi)) if lo == hi => write!(f, "{}", lo),
            (Some(lo), Some(hi)) => write!(f, "{}-{}", lo, hi),
            (Some(lo), None) => write!(f, "{}+", lo),
            (None, Some(hi)) => write!(f, "{} or lower", hi),
            (None, None) => f.write_str("any"),
        }
    }
}

impl FromStr for RangeKey {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(s: &str) -> (Option<Int>, Option<Int>) {
        let key = RangeKey::parse(s).unwrap();
        (key.lower(), key.upper())
    }

    #[test]
    fn test_parse_key_forms() {
        assert_eq!(bounds("5"), (Some(5), Some(5)));
        assert_eq!(bounds("2-11"), (Some(2), Some(11)));
        assert_eq!(bounds("32+"), (Some(32), None));
        assert_eq!(bounds("1 or lower"), (None, Some(1)));
    }

    #[test]
    fn test_parse_closed_key_unordered() {
        assert_eq!(bounds("11-2"), (Some(2), Some(11)));
        assert_eq!(bounds("7-7"), (Some(7), Some(7)));
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        assert_eq!(bounds(" 12 - 19 "), (Some(12), Some(19)));
        assert_eq!(bounds("20 +"), (Some(20), None));
        assert_eq!(bounds("1 + "), (Some(1), None));
        assert_eq!(bounds("1  or\tlower"), (None, Some(1)));
        assert_eq!(RangeKey::parse(" 3 ").unwrap().label(), " 3 ");
    }

    #[test]
    fn test_parse_invalid_keys() {
        for s in ["abc", "", "+", "1-", "-1", "1 or", "or lower", "1 or higher", "1orlower", "1or lower", "1 orlower", "1-2-3", "1.5", "99999999999999999999"] {
            assert_eq!(
                RangeKey::parse(s),
                Err(TableError::InvalidKey { key: s.to_string() }),
                "{:?}",
                s
            );
        }
    }

    #[test]
    fn test_contains() {
        let key = RangeKey::parse("2-11").unwrap();
        assert!(key.contains(2) && key.contains(11));
        assert!(!key.contains(1) && !key.contains(12));
        assert!(RangeKey::parse("1 or lower").unwrap().contains(-40));
        assert!(RangeKey::parse("20+").unwrap().contains(Int::MAX));
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["5", "2-11", "32+", "1 or lower", "11-2", " 4 - 6 "] {
            let key = RangeKey::parse(s).unwrap();
            let reparsed = RangeKey::parse(&key.to_string()).unwrap();
            assert_eq!((reparsed.lower(), reparsed.upper()), (key.lower(), key.upper()));
        }
        assert_eq!(RangeKey::parse("11-2").unwrap().to_string(), "2-11");
    }

    #[test]
    fn test_new_requires_a_bound() {
        assert_eq!(RangeKey::new(None, None), Err(TableError::Unbounded));
        let key = RangeKey::new(Some(9), Some(3)).unwrap();
        assert_eq!((key.lower(), key.upper()), (Some(3), Some(9)));
        assert_eq!(key.label(), "3-9");
        assert_eq!(RangeKey::new(None, Some(0)).unwrap().label(), "0 or lower");
        assert_eq!(RangeKey::exact(4).label(), "4");
    }

    #[test]
    fn test_overlaps() {
        let a = RangeKey::bounded(1, 10);
        assert!(a.overlaps(&RangeKey::bounded(5, 15)));
        assert!(a.overlaps(&RangeKey::parse("10+").unwrap()));
        assert!(!a.overlaps(&RangeKey::parse("11+").unwrap()));
        assert!(!a.overlaps(&RangeKey::parse("0 or lower").unwrap()));
    }
}
