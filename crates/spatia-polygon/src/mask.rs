//! Per-polygon membership bits.

/// Growable bitset with one bit per polygon index.
///
/// Filled by [`PolygonSetLocator::test_point_in`](crate::PolygonSetLocator::test_point_in):
/// after a query, bit `i` is set iff the point is inside polygon `i` on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolygonMask {
    words: Vec<u64>,
}

impl PolygonMask {
    /// Empty mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mask with room for `polygons` bits without reallocating.
    pub fn with_capacity(polygons: usize) -> Self {
        Self {
            words: vec![0; polygons.div_ceil(64)],
        }
    }

    /// Clear every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Toggle bit `index`, growing the mask if needed.
    pub fn flip(&mut self, index: usize) {
        let word = index / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] ^= 1u64 << (index % 64);
    }

    /// Whether bit `index` is set.
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|&w| w & (1u64 << (index % 64)) != 0)
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Indices of set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..64usize)
                .filter(move |&bit| word & (1u64 << bit) != 0)
                .map(move |bit| i * 64 + bit)
        })
    }
}
