//! The die chain: the ordered die sizes a roll can be stepped along.
//!
//! Stepping past either end holds at the extreme die, so stepping down from
//! a d3 keeps the d3.

use crate::common::UInt;

pub const DIE_CHAIN: [UInt; 13] = [3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 20, 24, 30];

/// Steps beyond this many in either direction land on the same die.
pub const MAX_STEPS: i32 = DIE_CHAIN.len() as i32;

/// Index of `sides` in [DIE_CHAIN], if it is on the chain.
pub fn position(sides: UInt) -> Option<usize> {
    DIE_CHAIN.iter().position(|&x| x == sides)
}

pub fn is_on_chain(sides: UInt) -> bool {
    position(sides).is_some()
}

/// Moves `sides` by `delta` steps along the chain, clamping at the ends.
/// Sizes that are not on the chain are returned unchanged.
pub fn step(sides: UInt, delta: i32) -> UInt {
    let Some(index) = position(sides) else {
        return sides;
    };
    let last = DIE_CHAIN.len() as i64 - 1;
    let wanted = index as i64 + i64::from(delta);
    let clamped = wanted.clamp(0, last);
    if clamped != wanted {
        tracing::trace!(sides, delta, "die chain step clamped at d{}", DIE_CHAIN[clamped as usize]);
    }
    DIE_CHAIN[clamped as usize]
}
