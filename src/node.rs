use std::fmt::{Debug, Formatter};

use derivative::Derivative;

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

/// Exclusive ownership of a subtree. `None` is the empty subtree, with a count of zero.
pub type Link<K> = Option<Box<Node<K>>>;

fn link_fmt<K: Debug>(link: &Link<K>, f: &mut Formatter) -> std::fmt::Result {
    match link {
        None => write!(f, "∅"),
        Some(n) => write!(f, "{:?}", n.key),
    }
}
fn child_fmt<K: Debug>([l, r]: &[Link<K>; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    link_fmt(l, f)?;
    write!(f, ", ")?;
    link_fmt(r, f)?;
    write!(f, "]")
}

#[derive(Clone, Derivative)]
#[derivative(Debug(bound = "K: Debug"))]
pub struct Node<K> {
    pub(crate) key: K,
    /// Left and right child
    #[derivative(Debug(format_with = "child_fmt"))]
    pub(crate) child: [Link<K>; 2],
    /// Heap key. A parent's priority is never below its children's.
    pub(crate) priority: u32,
    /// Number of nodes in this subtree, this one included.
    pub(crate) count: usize,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K, priority: u32) -> Box<Self> {
        Box::new(Self {
            key,
            child: [None, None],
            priority,
            count: 1,
        })
    }

    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn priority(&self) -> u32 {
        self.priority
    }
    /// Size of the subtree rooted here.
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn left(&self) -> Option<&Node<K>> {
        self.child[LEFT].as_deref()
    }
    pub fn right(&self) -> Option<&Node<K>> {
        self.child[RIGHT].as_deref()
    }

    // Call when children are changed.
    pub(crate) fn recalc(&mut self) {
        self.count = count(&self.child[LEFT]) + 1 + count(&self.child[RIGHT]);
    }

    /// Turns the node back into a lone leaf, handing back its former children.
    pub(crate) fn detach(&mut self) -> [Link<K>; 2] {
        self.count = 1;
        [self.child[LEFT].take(), self.child[RIGHT].take()]
    }
}

pub(crate) fn count<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.count)
}

pub(crate) fn priority<K>(link: &Link<K>) -> Option<u32> {
    link.as_ref().map(|n| n.priority)
}

/// Lifts `p.child[side]` into the place of `p`, which becomes its child on the opposite side.
/// Panics if that child is empty.
pub(crate) fn lift<K>(mut p: Box<Node<K>>, side: usize) -> Box<Node<K>> {
    let Some(mut q) = p.child[side].take() else {
        panic!("rotation around an empty subtree");
    };
    p.child[side] = q.child[side ^ 1].take();
    p.recalc();
    q.child[side ^ 1] = Some(p);
    q.recalc();
    q
}

/// Rotates `p` to the right: its left child becomes the subtree root.
///
/// Only links and counts change; keys and priorities are never looked at.
/// Panics if `p` has no left child.
pub fn rotate_to_right<K>(p: Box<Node<K>>) -> Box<Node<K>> {
    lift(p, LEFT)
}

/// Rotates `p` to the left: its right child becomes the subtree root.
/// Panics if `p` has no right child.
pub fn rotate_to_left<K>(p: Box<Node<K>>) -> Box<Node<K>> {
    lift(p, RIGHT)
}
