/// Default cap on the number of dice a [crate::roll::RollContext] will roll.
pub const DEFAULT_MAX_ROLLS: usize = 1000;

/// Limits applied while evaluating dice expressions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RollConfig {
    /// Total dice a context may roll over its lifetime; `None` is unbounded.
    pub max_rolls: Option<usize>,
}

impl RollConfig {
    pub const fn unbounded() -> Self {
        Self { max_rolls: None }
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            max_rolls: Some(DEFAULT_MAX_ROLLS),
        }
    }
}
