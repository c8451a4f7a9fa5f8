//! Range tables: payloads keyed by textual ranges of totals.
//!
//! Keys are sorted by lower bound, then upper bound, with open sides treated
//! as unbounded. A total resolves to the first key that contains it, so when
//! authored ranges overlap the one with the smaller lower bound wins. Use
//! [RangeTable::overlaps] or [RangeTable::check_disjoint] to catch such
//! overlaps while authoring a table.

mod key;

use crate::common::Int;
use std::ops::RangeInclusive;
use thiserror::Error;

pub use key::RangeKey;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("invalid table key {key:?}: expected N, N-M, N+ or \"N or lower\"")]
    InvalidKey { key: String },
    #[error("a table key needs at least one bound")]
    Unbounded,
    #[error("no result for total {0}")]
    NoMatch(Int),
    #[error("table keys {first:?} and {second:?} overlap")]
    Overlap { first: String, second: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeTable<T> {
    entries: Vec<(RangeKey, T)>,
}

impl<T> RangeTable<T> {
    /// Builds a table from `(key text, payload)` pairs. A single invalid key
    /// fails the whole table.
    pub fn new<I, K>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, payload)| Ok((RangeKey::parse(key.as_ref())?, payload)))
            .collect::<Result<Vec<_>, TableError>>()?;
        Ok(Self::from_keys(entries))
    }

    /// Builds a table from already parsed keys.
    pub fn from_keys(mut entries: Vec<(RangeKey, T)>) -> Self {
        entries.sort_by_key(|(key, _)| key.sort_key());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&RangeKey, &T)> + '_ {
        self.entries.iter().map(|(key, payload)| (key, payload))
    }

    pub fn keys(&self) -> impl Iterator<Item = &RangeKey> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// The entry whose range contains `total`.
    pub fn resolve(&self, total: Int) -> Result<(&RangeKey, &T), TableError> {
        match self.position(total) {
            Some(i) => {
                let (key, payload) = &self.entries[i];
                tracing::debug!(total, key = %key.label(), "resolved table entry");
                Ok((key, payload))
            }
            None => {
                tracing::debug!(total, "no table entry matched");
                Err(TableError::NoMatch(total))
            }
        }
    }

    /// Like [RangeTable::resolve], but hands back ownership of the entry.
    pub fn into_resolved(mut self, total: Int) -> Result<(RangeKey, T), TableError> {
        match self.position(total) {
            Some(i) => Ok(self.entries.swap_remove(i)),
            None => Err(TableError::NoMatch(total)),
        }
    }

    fn position(&self, total: Int) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key.contains(total))
    }

    /// Every pair of keys whose ranges share at least one total, in
    /// resolution order.
    pub fn overlaps(&self) -> Vec<(&RangeKey, &RangeKey)> {
        let mut ret = Vec::new();
        for (i, (a, _)) in self.entries.iter().enumerate() {
            for (b, _) in &self.entries[i + 1..] {
                if a.overlaps(b) {
                    ret.push((a, b));
                }
            }
        }
        ret
    }

    pub fn check_disjoint(&self) -> Result<(), TableError> {
        match self.overlaps().first() {
            Some((a, b)) => Err(TableError::Overlap {
                first: a.label().to_string(),
                second: b.label().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// The parts of `range` that no key covers, e.g. the faces of a die a
    /// table forgot.
    pub fn gaps(&self, range: RangeInclusive<Int>) -> Vec<RangeInclusive<Int>> {
        let (start, end) = range.into_inner();
        let mut gaps = Vec::new();
        if start > end {
            return gaps;
        }

        let mut next = start;
        for key in self.keys() {
            let (lo, hi) = key.sort_key();
            if hi < next {
                continue;
            }
            if lo > end {
                break;
            }
            if lo > next {
                gaps.push(next..=lo - 1);
            }
            if hi >= end {
                return gaps;
            }
            next = hi + 1;
        }
        gaps.push(next..=end);
        gaps
    }
}
