//! Array-backed disjoint-set forest.

/// Disjoint sets over `0..len` with path compression and union by rank.
///
/// # Examples
/// ```
/// use wayfinder_core::UnionFind;
///
/// let mut sets = UnionFind::new(4);
/// assert!(sets.unite(0, 1));
/// assert!(!sets.unite(1, 0));
/// assert_eq!(sets.find(0), sets.find(1));
/// assert_eq!(sets.component_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl UnionFind {
    /// Create `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Representative of the set containing `x`.
    ///
    /// Every node visited on the way to the root is re-parented directly
    /// under it.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.len()`.
    #[expect(
        clippy::indexing_slicing,
        reason = "x is range-checked and every parent link stays within range"
    )]
    pub fn find(&mut self, x: usize) -> usize {
        assert!(x < self.len(), "union-find index {x} out of range");
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `x` and `y`.
    ///
    /// Returns `false` when both were already in the same set.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[expect(
        clippy::indexing_slicing,
        reason = "find only returns roots inside the forest"
    )]
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] = self.rank[root_x].saturating_add(1);
            }
        }
        self.components -= 1;
        true
    }

    /// Number of elements tracked.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether no elements are tracked.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets remaining.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn starts_as_singletons() {
        let mut sets = UnionFind::new(3);
        assert_eq!(sets.component_count(), 3);
        assert_ne!(sets.find(0), sets.find(2));
    }

    #[rstest]
    fn unite_reports_whether_a_merge_happened() {
        let mut sets = UnionFind::new(5);
        assert!(sets.unite(0, 1));
        assert!(sets.unite(2, 3));
        assert!(sets.unite(1, 3));
        assert!(!sets.unite(0, 2));
        assert_eq!(sets.component_count(), 2);
        assert_eq!(sets.find(3), sets.find(0));
        assert_ne!(sets.find(4), sets.find(0));
    }

    #[rstest]
    fn find_compresses_paths() {
        let mut sets = UnionFind::new(4);
        sets.unite(0, 1);
        sets.unite(2, 3);
        sets.unite(0, 2);
        let root = sets.find(3);
        assert_eq!(sets.parent.get(3), Some(&root));
    }

    #[rstest]
    #[should_panic(expected = "out of range")]
    fn find_rejects_out_of_range_indices() {
        let mut sets = UnionFind::new(2);
        sets.find(2);
    }

    #[rstest]
    #[should_panic(expected = "out of range")]
    fn unite_rejects_out_of_range_indices() {
        let mut sets = UnionFind::new(2);
        sets.unite(0, 5);
    }
}
