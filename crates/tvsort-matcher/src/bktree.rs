//! A BK-tree for nearest-neighbour queries under a discrete metric.
//!
//! Lookups prune whole subtrees with the triangle inequality, so a query
//! with a small distance bound visits a fraction of the keys. The tree
//! gives no ordering guarantees on results.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::edit_distance;

/// A distance function satisfying the triangle inequality.
pub trait Metric<K: ?Sized> {
    /// Distance between two keys.
    fn distance(&self, a: &K, b: &K) -> u32;
}

impl<K: ?Sized, F> Metric<K> for F
where
    F: Fn(&K, &K) -> u32,
{
    fn distance(&self, a: &K, b: &K) -> u32 {
        self(a, b)
    }
}

/// Levenshtein distance over strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistance;

impl Metric<str> for EditDistance {
    fn distance(&self, a: &str, b: &str) -> u32 {
        u32::try_from(edit_distance(a, b)).unwrap_or(u32::MAX)
    }
}

impl Metric<String> for EditDistance {
    fn distance(&self, a: &String, b: &String) -> u32 {
        Metric::<str>::distance(self, a, b)
    }
}

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    children: BTreeMap<u32, Node<K>>,
}

/// A BK-tree over keys of type `K`.
///
/// # Examples
///
/// ```
/// use tvsort_matcher::bktree::BkTree;
///
/// let tree = BkTree::new(0..5i32, |a: &i32, b: &i32| a.abs_diff(*b));
/// let mut near: Vec<i32> = tree.find(&0, 1).into_iter().copied().collect();
/// near.sort();
/// assert_eq!(near, vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct BkTree<K, M> {
    root: Option<Node<K>>,
    metric: M,
    len: usize,
}

impl<K, M: Metric<K>> BkTree<K, M> {
    /// Build a tree from `keys`, inserted in random order.
    pub fn new(keys: impl IntoIterator<Item = K>, metric: M) -> Self {
        Self::with_rng(keys, metric, &mut rand::thread_rng())
    }

    /// Build a tree from `keys`, shuffled with `rng` before insertion.
    pub fn with_rng<R: Rng + ?Sized>(keys: impl IntoIterator<Item = K>, metric: M, rng: &mut R) -> Self {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.shuffle(rng);

        let mut tree = Self {
            root: None,
            metric,
            len: 0,
        };
        for key in keys {
            tree.insert(key);
        }
        tree
    }

    /// Add a key. Keys at distance zero from an existing key are dropped.
    pub fn insert(&mut self, key: K) {
        let Some(mut node) = self.root.as_mut() else {
            self.root = Some(Node {
                key,
                children: BTreeMap::new(),
            });
            self.len = 1;
            return;
        };

        loop {
            let d = self.metric.distance(&node.key, &key);
            if d == 0 {
                return;
            }
            match node.children.entry(d) {
                std::collections::btree_map::Entry::Occupied(child) => node = child.into_mut(),
                std::collections::btree_map::Entry::Vacant(slot) => {
                    slot.insert(Node {
                        key,
                        children: BTreeMap::new(),
                    });
                    self.len += 1;
                    return;
                }
            }
        }
    }

    /// Every key within `max_distance` of `target`.
    pub fn find(&self, target: &K, max_distance: u32) -> Vec<&K> {
        let mut found = Vec::new();
        let mut pending: Vec<&Node<K>> = self.root.iter().collect();

        while let Some(node) = pending.pop() {
            let d = self.metric.distance(&node.key, target);
            if d <= max_distance {
                found.push(&node.key);
            }
            let low = d.saturating_sub(max_distance);
            let high = d.saturating_add(max_distance);
            pending.extend(node.children.range(low..=high).map(|(_, child)| child));
        }
        found
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
