//! Treap with subtree counts: a binary search tree on keys, a max-heap on random priorities, and
//! every node knows the size of its subtree, so ranks can be selected and computed in expected
//! `O(log n)`.
//!
//! Costs are expected, not worst case. Priorities are drawn once per node from the tree's own
//! generator; an unlucky sequence can still produce a tree of height `O(n)`.

use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::ops::RangeBounds;

use debug_tree::{add_branch_to, add_leaf_to, AsTree, TreeBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::compare::{Compare, Natural};
use crate::error::{Result, TreapError};
use crate::node::{count, lift, priority, Link, Node, LEFT, RIGHT};
use crate::verify::{check_bst, check_rank_tree, is_treap};

mod iter;
mod split_join;

pub use iter::{IntoIter, Iter};

#[derive(Clone)]
pub struct TreapRk<K, C = Natural> {
    root: Link<K>,
    rng: StdRng,
    cmp: C,
}

impl<K: Debug, C> Debug for TreapRk<K, C> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        let _b = builder.add_branch(&format!("TreapRk ({} keys)", count(&self.root)));
        if self.root.is_some() {
            tree_preorder_dbg(self.root.as_deref(), &builder);
        }
        writeln!(f, "{}", builder.string())
    }
}

fn tree_preorder_dbg<K: Debug, T: AsTree>(u: Option<&Node<K>>, tree: &T) {
    let Some(n) = u else {
        add_leaf_to!(*tree, "∅");
        return;
    };
    add_branch_to!(*tree, "{:?} (priority {}, count {})", n.key, n.priority, n.count);
    if n.left().is_none() && n.right().is_none() {
        return;
    }
    tree_preorder_dbg(n.left(), tree);
    tree_preorder_dbg(n.right(), tree);
}

impl<K, C> TreapRk<K, C> {
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        count(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref())
    }

    /// Ascending iteration over the keys of rank `pos` and above; walking from the back stops at
    /// rank `pos` too. `pos == len` gives an empty iterator.
    pub fn iter_from(&self, pos: usize) -> Result<Iter<'_, K>> {
        let len = self.len();
        if pos > len {
            return Err(TreapError::OutOfRange { pos, len });
        }
        Ok(Iter::from_pos(self.root.as_deref(), pos))
    }
}

impl<K, C: Compare<K> + Default> Default for TreapRk<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Compare<K>> TreapRk<K, C> {
    /// Empty tree whose generator is seeded from the OS.
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::with_compare(C::default())
    }

    /// Empty tree with a deterministic generator.
    pub fn with_seed(seed: u64) -> Self
    where
        C: Default,
    {
        Self::with_seed_and_compare(seed, C::default())
    }

    pub fn with_compare(cmp: C) -> Self {
        Self::from_parts(None, StdRng::from_entropy(), cmp)
    }

    pub fn with_seed_and_compare(seed: u64, cmp: C) -> Self {
        Self::from_parts(None, StdRng::seed_from_u64(seed), cmp)
    }

    fn from_parts(root: Link<K>, rng: StdRng, cmp: C) -> Self {
        Self { root, rng, cmp }
    }

    /// Reseeds the generator. Nodes already in the tree keep their priorities.
    pub fn set_seed(&mut self, seed: u64) {
        log::debug!("reseeding treap generator with {seed}");
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn key_comp(&self) -> &C {
        &self.cmp
    }

    /// Heap order, search order and subtree counts all hold. Linear time.
    pub fn verify(&self) -> bool {
        let root = self.root.as_deref();
        is_treap(root) && check_bst(root, &self.cmp) && check_rank_tree(root)
    }

    /// Full `verify()` after a mutation, in debug builds with the `checked` feature. That is a
    /// linear walk per call, so a debug build doing `m` mutations on `n` keys costs `O(n m)`;
    /// build with `--no-default-features` or in release for large workloads.
    fn check_invariants(&self) {
        #[cfg(all(debug_assertions, feature = "checked"))]
        assert!(self.verify(), "treap invariants violated");
    }

    pub fn search(&self, key: &K) -> Option<&K> {
        self.search_by(|k| self.cmp.compare(key, k))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Descends the tree guided by `probe`, which tells where the wanted key lies relative to
    /// the key it is shown.
    pub fn search_by(&self, mut probe: impl FnMut(&K) -> Ordering) -> Option<&K> {
        let mut u = self.root.as_deref();
        while let Some(n) = u {
            match probe(&n.key) {
                Ordering::Less => u = n.left(),
                Ordering::Greater => u = n.right(),
                Ordering::Equal => return Some(&n.key),
            }
        }
        None
    }

    /// Mutable access to a key. The caller must not change how it compares.
    pub(crate) fn get_mut_by(&mut self, mut probe: impl FnMut(&C, &K) -> Ordering) -> Option<&mut K> {
        let cmp = &self.cmp;
        let mut u = self.root.as_deref_mut();
        while let Some(n) = u {
            match probe(cmp, &n.key) {
                Ordering::Less => u = n.child[LEFT].as_deref_mut(),
                Ordering::Greater => u = n.child[RIGHT].as_deref_mut(),
                Ordering::Equal => return Some(&mut n.key),
            }
        }
        None
    }

    /// The key with exactly `pos` keys before it, 0-indexed.
    pub fn select(&self, pos: usize) -> Result<&K> {
        let len = self.len();
        if pos >= len {
            return Err(TreapError::OutOfRange { pos, len });
        }
        let mut u = self.root.as_deref();
        let mut k = pos;
        while let Some(n) = u {
            let sl = count(&n.child[LEFT]);
            match k.cmp(&sl) {
                Ordering::Less => u = n.left(),
                Ordering::Equal => return Ok(&n.key),
                Ordering::Greater => {
                    k -= sl + 1;
                    u = n.right();
                }
            }
        }
        unreachable!("subtree counts disagree with the tree shape")
    }

    fn nth(&self, pos: usize) -> &K {
        match self.select(pos) {
            Ok(key) => key,
            Err(e) => unreachable!("{e}"),
        }
    }

    pub fn first(&self) -> Option<&K> {
        self.select(0).ok()
    }

    pub fn last(&self) -> Option<&K> {
        self.len().checked_sub(1).and_then(|pos| self.select(pos).ok())
    }

    /// Rank of `key`: the number of keys strictly less than it, which is where it sits or would
    /// be inserted. The second element is the stored key when present (the first of its equals).
    pub fn position(&self, key: &K) -> (usize, Option<&K>) {
        self.position_by(|k| self.cmp.compare(key, k))
    }

    pub fn position_by(&self, mut probe: impl FnMut(&K) -> Ordering) -> (usize, Option<&K>) {
        let mut rank = 0;
        let mut found = None;
        let mut u = self.root.as_deref();
        while let Some(n) = u {
            match probe(&n.key) {
                Ordering::Greater => {
                    rank += count(&n.child[LEFT]) + 1;
                    u = n.right();
                }
                ord => {
                    if ord == Ordering::Equal {
                        found = Some(&n.key);
                    }
                    u = n.left();
                }
            }
        }
        (rank, found)
    }

    /// Like [`position`](Self::position), but when `key` is absent the second element is its
    /// neighbour: the smallest key greater than it, or the largest key if there is none. Only an
    /// empty tree gives `None`.
    pub fn position_nearest(&self, key: &K) -> (usize, Option<&K>) {
        let (rank, found) = self.position(key);
        if found.is_some() {
            return (rank, found);
        }
        (rank, self.select(rank).ok().or_else(|| self.last()))
    }

    /// Ascending iteration starting at the first key not less than `key`.
    pub fn iter_from_key(&self, key: &K) -> Iter<'_, K> {
        let (rank, _) = self.position(key);
        Iter::from_pos(self.root.as_deref(), rank)
    }

    /// Inserts `key` unless an equal key is already present. Returns whether it was inserted.
    pub fn insert(&mut self, key: K) -> bool {
        let node = Node::new(key, self.rng.gen());
        let inserted = insert_node(&mut self.root, node, &self.cmp, false).is_ok();
        self.check_invariants();
        inserted
    }

    /// Inserts `key` even if equal keys are present; it lands after them in order.
    pub fn insert_dup(&mut self, key: K) {
        let node = Node::new(key, self.rng.gen());
        insert_dup_node(&mut self.root, node, &self.cmp);
        self.check_invariants();
    }

    /// Returns the stored key equal to `key`, inserting `key` first if there is none.
    pub fn search_or_insert(&mut self, key: K) -> &K {
        let (rank, found) = self.position(&key);
        if found.is_none() {
            self.insert_dup(key);
        }
        self.nth(rank)
    }

    pub fn remove(&mut self, key: &K) -> Option<K> {
        self.remove_with(|cmp, k| cmp.compare(key, k))
    }

    pub fn remove_by(&mut self, mut probe: impl FnMut(&K) -> Ordering) -> Option<K> {
        self.remove_with(|_, k| probe(k))
    }

    pub(crate) fn remove_with(&mut self, mut probe: impl FnMut(&C, &K) -> Ordering) -> Option<K> {
        let cmp = &self.cmp;
        let removed = remove_node(&mut self.root, &mut |k: &K| probe(cmp, k));
        self.check_invariants();
        removed.map(|n| n.key)
    }

    /// Removes the key at inorder position `pos`.
    pub fn remove_pos(&mut self, pos: usize) -> Result<K> {
        let len = self.len();
        if pos >= len {
            return Err(TreapError::OutOfRange { pos, len });
        }
        let removed = remove_at(&mut self.root, pos);
        self.check_invariants();
        match removed {
            Some(n) => Ok(n.key),
            None => unreachable!("position {pos} vanished from a tree of {len} keys"),
        }
    }
}

impl<K, C: Compare<K> + Default> FromIterator<K> for TreapRk<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, C: Compare<K>> Extend<K> for TreapRk<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K, C> IntoIterator for &'a TreapRk<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        Iter::new(self.root.as_deref())
    }
}

impl<K, C> IntoIterator for TreapRk<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        IntoIter::new(self.root)
    }
}

fn rotate_up<K>(link: &mut Link<K>, side: usize) {
    if let Some(top) = link.take() {
        *link = Some(lift(top, side));
    }
}

/// Leaf insertion followed by rotations on the way back up while the new node outranks its
/// parent. On a rejected duplicate the node is handed back and no link has been touched.
fn insert_node<K, C: Compare<K>>(
    link: &mut Link<K>,
    node: Box<Node<K>>,
    cmp: &C,
    dup: bool,
) -> std::result::Result<(), Box<Node<K>>> {
    let Some(root) = link.as_mut() else {
        *link = Some(node);
        return Ok(());
    };
    let side = match cmp.compare(&node.key, &root.key) {
        Ordering::Less => LEFT,
        Ordering::Greater => RIGHT,
        Ordering::Equal if dup => RIGHT,
        Ordering::Equal => return Err(node),
    };
    insert_node(&mut root.child[side], node, cmp, dup)?;
    root.count += 1;
    if priority(&root.child[side]) > Some(root.priority) {
        rotate_up(link, side);
    }
    Ok(())
}

fn insert_dup_node<K, C: Compare<K>>(link: &mut Link<K>, node: Box<Node<K>>, cmp: &C) {
    if insert_node(link, node, cmp, true).is_err() {
        unreachable!("insertion with duplicates never rejects");
    }
}

fn remove_node<K, F: FnMut(&K) -> Ordering>(
    link: &mut Link<K>,
    probe: &mut F,
) -> Option<Box<Node<K>>> {
    let n = link.as_mut()?;
    let side = match probe(&n.key) {
        Ordering::Less => LEFT,
        Ordering::Greater => RIGHT,
        Ordering::Equal => return sink_out(link),
    };
    let removed = remove_node(&mut n.child[side], probe)?;
    n.count -= 1;
    Some(removed)
}

fn remove_at<K>(link: &mut Link<K>, pos: usize) -> Option<Box<Node<K>>> {
    let n = link.as_mut()?;
    let sl = count(&n.child[LEFT]);
    let (side, pos) = match pos.cmp(&sl) {
        Ordering::Less => (LEFT, pos),
        Ordering::Equal => return sink_out(link),
        Ordering::Greater => (RIGHT, pos - sl - 1),
    };
    let removed = remove_at(&mut n.child[side], pos)?;
    n.count -= 1;
    Some(removed)
}

/// Pushes the root of `link` down, always lifting its higher-priority child, until it is a leaf,
/// then unlinks it.
fn sink_out<K>(link: &mut Link<K>) -> Option<Box<Node<K>>> {
    let n = link.take()?;
    let side = match (priority(&n.child[LEFT]), priority(&n.child[RIGHT])) {
        (None, None) => return Some(n),
        (Some(_), None) => LEFT,
        (None, Some(_)) => RIGHT,
        (Some(l), Some(r)) => {
            if l >= r {
                LEFT
            } else {
                RIGHT
            }
        }
    };
    let mut top = lift(n, side);
    let removed = sink_out(&mut top.child[side ^ 1]);
    top.count -= 1;
    *link = Some(top);
    removed
}

fn range_to_lr(range: impl RangeBounds<usize>, len: usize) -> [usize; 2] {
    use std::ops::Bound::*;
    let start = match range.start_bound() {
        Included(start) => *start,
        Excluded(start) => *start + 1,
        Unbounded => 0,
    };
    let end = match range.end_bound() {
        Included(end) => *end + 1,
        Excluded(end) => *end,
        Unbounded => len,
    };
    [start, end]
}
