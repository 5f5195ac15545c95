use bit_vec::BitVec;

/// Traversal marks keyed by slot index.
///
/// Vertices and edges live in slot arenas, so a mark is one bit at the
/// slot's index. The bit vector grows lazily on the first mark past its
/// end, and an index beyond the end reads as unmarked.
#[derive(Debug, Default, Clone)]
pub struct Marks {
    bits: BitVec,
}

impl Marks {
    /// Sets the mark at `index`.
    ///
    /// Returns true when the mark was previously unset.
    #[inline]
    pub fn mark(&mut self, index: usize) -> bool {
        let len = self.bits.len();
        if index >= len {
            let grow_by = index + 1 - len;
            self.bits.grow(grow_by, false);
        }

        if !self.bits[index] {
            self.bits.set(index, true);
            true
        } else {
            false
        }
    }

    /// Clears the mark at `index`.
    ///
    /// Returns true when the mark was previously set.
    #[inline]
    pub fn clear(&mut self, index: usize) -> bool {
        match self.bits.get(index) {
            Some(true) => {
                self.bits.set(index, false);
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_marked(&self, index: usize) -> bool {
        self.bits.get(index).unwrap_or(false)
    }

    /// Clears every mark without releasing storage.
    pub fn clear_all(&mut self) {
        self.bits.clear();
    }

    /// Number of set marks.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&bit| bit).count()
    }

    /// Drops storage along with every mark.
    pub fn reset(&mut self) {
        self.bits = BitVec::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn default_has_nothing_marked() {
        let marks = Marks::default();
        assert!(!marks.is_marked(0));
        assert!(!marks.is_marked(42));
        assert_eq!(marks.count(), 0);
    }

    #[test]
    fn mark_returns_true_only_first_time() {
        let mut marks = Marks::default();

        assert!(marks.mark(10));
        assert!(marks.is_marked(10));
        assert!(!marks.mark(10));
        assert!(marks.is_marked(10));

        // neighbours untouched by growth
        assert!(!marks.is_marked(9));
        assert!(!marks.is_marked(11));
    }

    #[test]
    fn clear_is_independent_per_index() {
        let mut marks = Marks::default();
        marks.mark(1);
        marks.mark(2);

        assert!(marks.clear(1));
        assert!(!marks.clear(1), "second clear reports nothing changed");
        assert!(!marks.is_marked(1));
        assert!(marks.is_marked(2));
        assert!(!marks.clear(100), "clearing past the end is a no-op");
    }

    #[test]
    fn clear_all_and_reset() {
        let mut marks = Marks::default();
        for index in [0, 3, 7] {
            marks.mark(index);
        }
        assert_eq!(marks.count(), 3);

        marks.clear_all();
        assert_eq!(marks.count(), 0);
        assert!(!marks.is_marked(3));

        marks.mark(5);
        marks.reset();
        assert!(!marks.is_marked(5));
    }

    proptest! {
        // Marks must behave like a set of indices under mark/clear.
        #[test]
        fn prop_marks_behave_like_set(ops in proptest::collection::vec((any::<bool>(), 0usize..200), 0..300)) {
            let mut marks = Marks::default();
            let mut reference = HashSet::new();

            for (set, index) in ops {
                if set {
                    prop_assert_eq!(marks.mark(index), reference.insert(index), "mark({}) mismatch", index);
                } else {
                    prop_assert_eq!(marks.clear(index), reference.remove(&index), "clear({}) mismatch", index);
                }
                prop_assert_eq!(marks.is_marked(index), reference.contains(&index));
            }

            prop_assert_eq!(marks.count(), reference.len());
        }
    }

    #[test]
    fn random_stress_marks() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x_4D41_524B_5321);

        for _case in 0..100 {
            let mut marks = Marks::default();
            let mut reference = HashSet::new();

            let steps = rng.random_range(0..500);
            for _ in 0..steps {
                let index: usize = rng.random_range(0..256);
                assert_eq!(marks.mark(index), reference.insert(index));
            }

            for index in 0..256 {
                assert_eq!(marks.is_marked(index), reference.contains(&index));
            }
        }
    }
}
