//! Hash functions over a key's textual representation, from the naive
//! character sum to the position-weighted sum the table uses by default.
//!
//! Sums wrap on overflow, so input of any length hashes without panicking.

use std::hash::{BuildHasherDefault, Hasher};

use crate::TableError;

/// Sum of the code points of `text`. Anagrams collide and a one-letter edit
/// moves the hash by a few units at most.
pub fn char_sum(text: &str) -> u64 {
    text.chars().map(u64::from).fold(0, u64::wrapping_add)
}

/// Each code point weighted by its 1-based position, so character order
/// matters.
pub fn position_weighted(text: &str) -> u64 {
    text.chars()
        .zip(1u64..)
        .fold(0, |sum, (c, position)| {
            sum.wrapping_add(position.wrapping_mul(u64::from(c)))
        })
}

/// [`position_weighted`] with leading `'` characters removed first.
///
/// A quoted string representation starts and ends with `'`, and those two
/// quotes at positions 1 and n+2 make the hash of every short string even.
/// Dropping the left one breaks that parity bias.
pub fn position_weighted_unquoted(text: &str) -> u64 {
    position_weighted(text.trim_start_matches('\''))
}

/// Reduces an unbounded hash code into `0..modulus`.
pub fn bounded(hash: u64, modulus: u64) -> Result<u64, TableError> {
    hash.checked_rem(modulus).ok_or(TableError::InvalidCapacity)
}

/// Position-weighted byte sum. Positions keep counting across `write` calls,
/// so for ASCII input fed in one piece this agrees with
/// [`position_weighted`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionWeightedHasher {
    sum: u64,
    position: u64,
}

impl Hasher for PositionWeightedHasher {
    fn finish(&self) -> u64 {
        self.sum
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.position = self.position.wrapping_add(1);
            self.sum = self
                .sum
                .wrapping_add(self.position.wrapping_mul(u64::from(byte)));
        }
    }
}

pub type BuildPositionWeighted = BuildHasherDefault<PositionWeightedHasher>;
