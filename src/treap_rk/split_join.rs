//! Structural operations. Nodes only ever move between trees, so every count and every key
//! taken from the inputs is found in the outputs.

use std::cmp::Ordering;
use std::ops::RangeBounds;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{insert_dup_node, insert_node, range_to_lr, remove_node, TreapRk};
use crate::compare::Compare;
use crate::error::{Result, TreapError};
use crate::node::{count, Link, Node, LEFT, RIGHT};

impl<K, C: Compare<K> + Clone> TreapRk<K, C> {
    /// A new tree around `root`, with a generator seeded from ours and the same ordering.
    fn spawn(&mut self, root: Link<K>) -> Self {
        let tree = Self::from_parts(root, StdRng::seed_from_u64(self.rng.gen()), self.cmp.clone());
        tree.check_invariants();
        tree
    }

    /// Splits into the `pos` smallest keys and the rest, leaving `self` empty.
    ///
    /// `pos == 0` gives an empty left tree and `pos == len` an empty right one. Fails without
    /// touching the tree if `pos > len`.
    pub fn split_pos(&mut self, pos: usize) -> Result<(Self, Self)> {
        let len = self.len();
        if pos > len {
            return Err(TreapError::OutOfRange { pos, len });
        }
        log::trace!("split_pos({pos}) on {len} keys");
        let (l, r) = split_pos_link(self.root.take(), pos);
        Ok((self.spawn(l), self.spawn(r)))
    }

    /// Splits around a key that is not in the tree: keys below it go left, keys above it go
    /// right, and `self` is left empty. Returns `None`, leaving the tree as it was, if `key` is
    /// present.
    pub fn split_key(&mut self, key: &K) -> Option<(Self, Self)> {
        if self.contains(key) {
            return None;
        }
        Some(self.split_key_dup(key))
    }

    /// Splits into keys less than `key` and keys greater or equal to it, leaving `self` empty.
    /// Every key equal to `key` ends up on the right.
    pub fn split_key_dup(&mut self, key: &K) -> (Self, Self) {
        log::trace!("split_key_dup on {} keys", self.len());
        let cmp = &self.cmp;
        let (l, r) = split_key_link(self.root.take(), &mut |k: &K| cmp.compare(key, k));
        (self.spawn(l), self.spawn(r))
    }

    /// Takes out the keys whose ranks fall in `range` as a new tree. The remaining keys stay.
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) -> Result<Self> {
        let len = self.len();
        let [start, end] = range_to_lr(range, len);
        if start > end || end > len {
            return Err(TreapError::InvalidRange { start, end, len });
        }
        log::trace!("remove_range({start}..{end}) on {len} keys");
        let (rest, after) = split_pos_link(self.root.take(), end);
        let (before, taken) = split_pos_link(rest, start);
        self.root = join_exclusive_link(before, after);
        self.check_invariants();
        Ok(self.spawn(taken))
    }

    /// Moves every node of `other` into `self`. When an incoming key is already present, the
    /// resident node is moved to `dup` and the incoming one takes its place, so
    /// `self.len() + dup.len()` grows by exactly what `other` held. `other` is left empty.
    pub fn join(&mut self, other: &mut Self, dup: &mut Self) {
        log::trace!("join {} keys into {} keys", other.len(), self.len());
        let mut pending: Vec<Box<Node<K>>> = other.root.take().into_iter().collect();
        while let Some(mut incoming) = pending.pop() {
            pending.extend(incoming.detach().into_iter().flatten());
            loop {
                match insert_node(&mut self.root, incoming, &self.cmp, false) {
                    Ok(()) => break,
                    Err(back) => {
                        let cmp = &self.cmp;
                        let mut probe = |k: &K| cmp.compare(&back.key, k);
                        if let Some(resident) = remove_node(&mut self.root, &mut probe) {
                            insert_dup_node(&mut dup.root, resident, &dup.cmp);
                        }
                        incoming = back;
                    }
                }
            }
        }
        self.check_invariants();
        dup.check_invariants();
    }

    /// Moves every node of `other` into `self`, keeping duplicates. Nodes keep the priority
    /// they were born with. Costs `O(m log(n + m))` for `m` incoming keys.
    pub fn join_dup(&mut self, other: &mut Self) {
        log::trace!("join_dup {} keys into {} keys", other.len(), self.len());
        let mut pending: Vec<Box<Node<K>>> = other.root.take().into_iter().collect();
        while let Some(mut incoming) = pending.pop() {
            pending.extend(incoming.detach().into_iter().flatten());
            insert_dup_node(&mut self.root, incoming, &self.cmp);
        }
        self.check_invariants();
    }

    /// Appends `other`, all of whose keys must be greater than every key of `self`, merging by
    /// priority along the facing spines. Fails with [`TreapError::Overlap`] and moves nothing
    /// when the domains are not strictly ordered.
    pub fn join_exclusive(&mut self, other: &mut Self) -> Result<()> {
        if let (Some(max), Some(min)) = (self.last(), other.first()) {
            if !self.cmp.less(max, min) {
                return Err(TreapError::Overlap);
            }
        }
        log::trace!("join_exclusive {} keys after {} keys", other.len(), self.len());
        self.root = join_exclusive_link(self.root.take(), other.root.take());
        self.check_invariants();
        Ok(())
    }
}

/// (First k, rest)
fn split_pos_link<K>(u: Link<K>, k: usize) -> (Link<K>, Link<K>) {
    let Some(mut n) = u else {
        return (None, None);
    };
    if k == 0 {
        // If k == 0 the node is fully returned on the right
        return (None, Some(n));
    }
    let szl = count(&n.child[LEFT]);
    if k <= szl {
        let (ll, lr) = split_pos_link(n.child[LEFT].take(), k);
        n.child[LEFT] = lr;
        n.recalc();
        (ll, Some(n))
    } else {
        let (rl, rr) = split_pos_link(n.child[RIGHT].take(), k - szl - 1);
        n.child[RIGHT] = rl;
        n.recalc();
        (Some(n), rr)
    }
}

/// (Keys the probe places after, the rest). `probe(k)` is `Greater` exactly for the keys that go
/// left.
fn split_key_link<K, F: FnMut(&K) -> Ordering>(u: Link<K>, probe: &mut F) -> (Link<K>, Link<K>) {
    let Some(mut n) = u else {
        return (None, None);
    };
    if probe(&n.key) == Ordering::Greater {
        let (rl, rr) = split_key_link(n.child[RIGHT].take(), probe);
        n.child[RIGHT] = rl;
        n.recalc();
        (Some(n), rr)
    } else {
        let (ll, lr) = split_key_link(n.child[LEFT].take(), probe);
        n.child[LEFT] = lr;
        n.recalc();
        (ll, Some(n))
    }
}

/// Merges two trees where every key of `u` precedes every key of `v`.
fn join_exclusive_link<K>(u: Link<K>, v: Link<K>) -> Link<K> {
    match (u, v) {
        (None, v) => v,
        (u, None) => u,
        (Some(mut u), Some(mut v)) => {
            if u.priority > v.priority {
                u.child[RIGHT] = join_exclusive_link(u.child[RIGHT].take(), Some(v));
                u.recalc();
                Some(u)
            } else {
                v.child[LEFT] = join_exclusive_link(Some(u), v.child[LEFT].take());
                v.recalc();
                Some(v)
            }
        }
    }
}
