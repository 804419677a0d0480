//! Pairwise gas compatibility.

use crate::gas::Gas;
use std::collections::BTreeSet;

/// Symmetric relation stating which gas pairs may share the gas path.
///
/// Pairs are stored by index with the smaller index first, so
/// `add_mixable(a, b)` and `add_mixable(b, a)` record the same entry.
/// Every gas is implicitly compatible with itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwoGasMixer {
    pairs: BTreeSet<(u32, u32)>,
}

fn key(a: u32, b: u32) -> (u32, u32) {
    if a <= b { (a, b) } else { (b, a) }
}

impl TwoGasMixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mixable(&mut self, g1: &Gas, g2: &Gas) {
        self.pairs.insert(key(g1.index(), g2.index()));
    }

    pub fn can_mix(&self, g1: &Gas, g2: &Gas) -> bool {
        self.can_mix_indices(g1.index(), g2.index())
    }

    /// Same as `can_mix` for callers that only hold catalogue indices.
    pub fn can_mix_indices(&self, a: u32, b: u32) -> bool {
        a == b || self.pairs.contains(&key(a, b))
    }

    /// Recorded pairs, smaller index first.
    pub fn mixable_pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
