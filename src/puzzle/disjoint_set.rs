//! Disjoint-set forest with union by rank and path compression

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    size: Vec<usize>,
    groups: usize,
}

impl DisjointSet {
    /// `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            groups: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `x`, compressing the path on the way
    pub fn find(&mut self, x: usize) -> usize {
        let root = self.root(x);
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Representative of `x` without touching the forest
    pub fn root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Merge the set holding `dragged` into the set holding `target`.
    ///
    /// The higher-ranked root wins; on a tie the target's root becomes the
    /// representative. Returns the new representative, or `None` if both were
    /// already in the same set.
    pub fn union(&mut self, dragged: usize, target: usize) -> Option<usize> {
        let a = self.find(dragged);
        let b = self.find(target);
        if a == b {
            return None;
        }
        let (child, root) = if self.rank[a] > self.rank[b] { (b, a) } else { (a, b) };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        if self.rank[child] == self.rank[root] {
            self.rank[root] += 1;
        }
        self.groups -= 1;
        Some(root)
    }

    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Number of elements in the set holding `x`
    pub fn size_of(&self, x: usize) -> usize {
        self.size[self.root(x)]
    }

    /// Number of disjoint sets
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Every element sharing a set with `x`, ascending
    pub fn members(&self, x: usize) -> Vec<usize> {
        let root = self.root(x);
        (0..self.len()).filter(|&i| self.root(i) == root).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_singletons() {
        let set = DisjointSet::new(4);
        assert_eq!(set.group_count(), 4);
        for i in 0..4 {
            assert_eq!(set.root(i), i);
            assert_eq!(set.size_of(i), 1);
        }
    }

    #[test]
    fn test_tie_goes_to_target() {
        let mut set = DisjointSet::new(12);
        assert_eq!(set.union(0, 1), Some(1));
        assert_eq!(set.root(0), 1);
        assert_eq!(set.root(1), 1);
        assert_eq!(set.size_of(0), 2);
    }

    #[test]
    fn test_higher_rank_wins() {
        let mut set = DisjointSet::new(5);
        set.union(0, 1); // root 1, rank 1
        assert_eq!(set.union(1, 2), Some(1));
        assert_eq!(set.members(2), vec![0, 1, 2]);
        assert_eq!(set.group_count(), 3);
    }

    #[test]
    fn test_union_same_set_is_noop() {
        let mut set = DisjointSet::new(3);
        set.union(0, 1);
        assert_eq!(set.union(1, 0), None);
        assert_eq!(set.group_count(), 2);
    }

    #[test]
    fn test_find_compresses() {
        let mut set = DisjointSet::new(8);
        set.union(0, 1);
        set.union(2, 3);
        set.union(1, 3);
        let root = set.find(0);
        assert_eq!(set.parent[0], root);
    }

    proptest! {
        #[test]
        fn partition_stays_valid(
            pairs in proptest::collection::vec((0usize..12, 0usize..12), 0..40)
        ) {
            let mut set = DisjointSet::new(12);
            for (a, b) in pairs {
                set.union(a, b);
            }
            let mut seen = [false; 12];
            let mut groups = 0;
            for i in 0..12 {
                if set.root(i) == i {
                    groups += 1;
                    let members = set.members(i);
                    prop_assert_eq!(members.len(), set.size_of(i));
                    for m in members {
                        prop_assert!(!seen[m], "element {} in two groups", m);
                        seen[m] = true;
                    }
                }
            }
            prop_assert!(seen.iter().all(|&s| s));
            prop_assert_eq!(groups, set.group_count());
        }

        #[test]
        fn any_spanning_order_ends_in_one_group(
            order in Just((0usize..11).collect::<Vec<_>>()).prop_shuffle()
        ) {
            // Chain i -- i+1 merged in a random order
            let mut set = DisjointSet::new(12);
            for i in order {
                set.union(i, i + 1);
            }
            prop_assert_eq!(set.group_count(), 1);
            prop_assert_eq!(set.size_of(0), 12);
        }
    }
}
