use std::iter::FusedIterator;

use crate::node::{Link, Node, LEFT, RIGHT};

/// Ascending iterator over the keys of a tree, also walkable from the back. A clone resumes where
/// its source stands; `iter()` again starts over. The tree cannot change while one is alive.
pub struct Iter<'a, K> {
    /// Pending left spines, next node on top.
    front: Vec<&'a Node<K>>,
    back: Vec<&'a Node<K>>,
    /// Rank of the key `next` returns.
    pos: usize,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(root: Option<&'a Node<K>>) -> Self {
        Self::from_pos(root, 0)
    }

    /// Starts at rank `pos`, which must not exceed the tree size. `O(log n)`.
    pub(super) fn from_pos(root: Option<&'a Node<K>>, pos: usize) -> Self {
        let len = root.map_or(0, Node::count);
        debug_assert!(pos <= len);
        let mut iter = Self {
            front: vec![],
            back: vec![],
            pos,
            remaining: len - pos,
        };
        let mut u = root;
        let mut k = pos;
        while let Some(n) = u {
            let sl = n.left().map_or(0, Node::count);
            if k < sl {
                iter.front.push(n);
                u = n.left();
            } else if k == sl {
                iter.front.push(n);
                break;
            } else {
                k -= sl + 1;
                u = n.right();
            }
        }
        iter.push_right_spine(root);
        iter
    }

    /// Rank of the key the next call to `next` yields. Equals the tree size once the front is
    /// exhausted.
    pub fn rank(&self) -> usize {
        self.pos
    }

    fn push_left_spine(&mut self, mut u: Option<&'a Node<K>>) {
        while let Some(n) = u {
            self.front.push(n);
            u = n.left();
        }
    }

    fn push_right_spine(&mut self, mut u: Option<&'a Node<K>>) {
        while let Some(n) = u {
            self.back.push(n);
            u = n.right();
        }
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            pos: self.pos,
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.front.pop()?;
        self.push_left_spine(n.right());
        self.remaining -= 1;
        self.pos += 1;
        Some(n.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.back.pop()?;
        self.push_right_spine(n.left());
        self.remaining -= 1;
        Some(n.key())
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

/// Owning ascending iterator, taking the tree apart node by node.
pub struct IntoIter<K> {
    stack: Vec<Box<Node<K>>>,
    remaining: usize,
}

impl<K> IntoIter<K> {
    pub(super) fn new(root: Link<K>) -> Self {
        let mut iter = Self {
            stack: vec![],
            remaining: root.as_ref().map_or(0, |n| n.count),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut u: Link<K>) {
        while let Some(mut n) = u {
            u = n.child[LEFT].take();
            self.stack.push(n);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let mut n = self.stack.pop()?;
        self.push_left_spine(n.child[RIGHT].take());
        self.remaining -= 1;
        Some(n.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}
