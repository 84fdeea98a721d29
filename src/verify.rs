//! O(n) invariant checkers. They define what every tree operation must preserve and are meant
//! for tests and checked builds, not for hot paths.

use crate::compare::Compare;
use crate::node::Node;

/// Heap order on priorities: no node has a child with a strictly greater priority.
pub fn is_treap<K>(root: Option<&Node<K>>) -> bool {
    let Some(n) = root else {
        return true;
    };
    [n.left(), n.right()]
        .into_iter()
        .flatten()
        .all(|c| c.priority() <= n.priority())
        && is_treap(n.left())
        && is_treap(n.right())
}

/// Every count equals one plus the counts of both children.
pub fn check_rank_tree<K>(root: Option<&Node<K>>) -> bool {
    let Some(n) = root else {
        return true;
    };
    let below = n.left().map_or(0, Node::count) + n.right().map_or(0, Node::count);
    n.count() == below + 1 && check_rank_tree(n.left()) && check_rank_tree(n.right())
}

/// Search tree order under `cmp`. Equal keys may sit on either side of each other, since
/// `insert_dup` and the rotations that follow it keep duplicates adjacent but not sided.
pub fn check_bst<K, C: Compare<K>>(root: Option<&Node<K>>, cmp: &C) -> bool {
    check_bst_within(root, None, None, cmp)
}

fn check_bst_within<K, C: Compare<K>>(
    root: Option<&Node<K>>,
    lo: Option<&K>,
    hi: Option<&K>,
    cmp: &C,
) -> bool {
    let Some(n) = root else {
        return true;
    };
    if lo.is_some_and(|lo| cmp.less(n.key(), lo)) || hi.is_some_and(|hi| cmp.less(hi, n.key())) {
        return false;
    }
    check_bst_within(n.left(), lo, Some(n.key()), cmp)
        && check_bst_within(n.right(), Some(n.key()), hi, cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{Natural, Reverse};
    use crate::node::{Link, LEFT, RIGHT};

    fn node(l: Link<i32>, key: i32, priority: u32, r: Link<i32>) -> Link<i32> {
        let mut n = Node::new(key, priority);
        n.child = [l, r];
        n.recalc();
        Some(n)
    }

    fn sample() -> Link<i32> {
        //      5 (9)
        //     /     \
        //   2 (4)   8 (7)
        //           /
        //         6 (1)
        node(
            node(None, 2, 4, None),
            5,
            9,
            node(node(None, 6, 1, None), 8, 7, None),
        )
    }

    #[test]
    fn test_valid_tree() {
        let t = sample();
        assert!(is_treap(t.as_deref()));
        assert!(check_rank_tree(t.as_deref()));
        assert!(check_bst(t.as_deref(), &Natural));
        assert!(!check_bst(t.as_deref(), &Reverse));
        assert!(is_treap::<i32>(None) && check_rank_tree::<i32>(None));
    }

    #[test]
    fn test_heap_order_broken() {
        let mut t = sample();
        t.as_mut().unwrap().child[RIGHT].as_mut().unwrap().priority = 10;
        assert!(!is_treap(t.as_deref()));
        assert!(check_bst(t.as_deref(), &Natural));
    }

    #[test]
    fn test_count_broken() {
        let mut t = sample();
        t.as_mut().unwrap().count = 5;
        assert!(!check_rank_tree(t.as_deref()));
        assert!(is_treap(t.as_deref()));
    }

    #[test]
    fn test_order_broken_deep() {
        // 6 moved under 2: right of its parent, yet inside the left subtree of 5.
        let mut t = sample();
        let six = t.as_mut().unwrap().child[RIGHT].as_mut().unwrap().child[LEFT].take();
        let root = t.as_mut().unwrap();
        root.child[LEFT].as_mut().unwrap().child[RIGHT] = six;
        root.child[LEFT].as_mut().unwrap().recalc();
        root.child[RIGHT].as_mut().unwrap().recalc();
        root.recalc();
        assert!(!check_bst(t.as_deref(), &Natural));
        assert!(check_rank_tree(t.as_deref()));
    }

    #[test]
    fn test_equal_keys_either_side() {
        let t = node(node(None, 3, 1, None), 3, 5, node(None, 3, 2, None));
        assert!(check_bst(t.as_deref(), &Natural));
        let t = node(node(None, 4, 1, None), 3, 5, None);
        assert!(!check_bst(t.as_deref(), &Natural));
    }
}
