//! The four traversal orders over a host tree, decoupled from querying.

use std::collections::{HashSet, VecDeque};

use crate::host::UastNode;

/// Which of the four traversal orders a [`NodeIterator`] walks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    PreOrder,
    PostOrder,
    LevelOrder,
    PositionOrder,
}

/// Stateful traversal over a host tree rooted at the node given to
/// [`NodeIterator::new`]. Implements [`std::iter::Iterator`] directly: exhaustion
/// is simply `None`.
///
/// `F` is the optional per-node transform; `fn(H) -> H` by default (the identity)
/// for callers who construct with [`NodeIterator::new`].
pub struct NodeIterator<H: UastNode, F = fn(H) -> H> {
    order: TraversalOrder,
    pending: VecDeque<H>,
    visited: HashSet<H>,
    transform: Option<F>,
    /// Position-order drains and sorts `pending` lazily on the first `next` call.
    preloaded: bool,
}

impl<H: UastNode> NodeIterator<H> {
    /// Constructs an iterator with no transform (the identity).
    pub fn new(root: H, order: TraversalOrder) -> Self {
        Self::with_transform_opt(root, order, None)
    }
}

impl<H: UastNode, F: Fn(H) -> H> NodeIterator<H, F> {
    /// Constructs an iterator that passes every node enqueued into `pending`
    /// (including the root) through `transform` before emission.
    pub fn with_transform(root: H, order: TraversalOrder, transform: F) -> Self {
        Self::with_transform_opt(root, order, Some(transform))
    }

    fn with_transform_opt(root: H, order: TraversalOrder, transform: Option<F>) -> Self {
        let seeded = match &transform {
            Some(t) => t(root),
            None => root,
        };
        let mut pending = VecDeque::new();
        pending.push_back(seeded);
        Self {
            order,
            pending,
            visited: HashSet::new(),
            transform,
            preloaded: false,
        }
    }

    fn apply(&self, node: H) -> H {
        match &self.transform {
            Some(t) => t(node),
            None => node,
        }
    }

    fn next_pre_order(&mut self) -> Option<H> {
        let node = self.pending.pop_front()?;
        // Children are fetched from the pre-transform handle, then pushed
        // front-to-back in reverse index order so the leftmost child is emitted next.
        for i in (0..node.children_size()).rev() {
            let child = self.apply(node.child_at(i));
            self.pending.push_front(child);
        }
        Some(node)
    }

    fn next_level_order(&mut self) -> Option<H> {
        let node = self.pending.pop_front()?;
        for i in 0..node.children_size() {
            let child = self.apply(node.child_at(i));
            self.pending.push_back(child);
        }
        Some(node)
    }

    /// Front-peek, don't-pop-until-visited loop. Avoids recursion so a
    /// self-referential subtree cannot grow the call stack without bound -- the
    /// `visited` set is what bounds it instead.
    fn next_post_order(&mut self) -> Option<H> {
        loop {
            let node = *self.pending.front()?;
            if self.visited.contains(&node) {
                self.pending.pop_front();
                return Some(node);
            }
            self.visited.insert(node);
            for i in (0..node.children_size()).rev() {
                let child = self.apply(node.child_at(i));
                if !self.visited.contains(&child) {
                    self.pending.push_front(child);
                }
            }
        }
    }

    fn preload_position_order(&mut self) {
        // A fresh pre-order sub-traversal, independent of `self.pending`'s current
        // contents (which at this point holds just the seeded root).
        let mut pre = VecDeque::new();
        let root = self.pending.pop_front().expect("root was seeded at construction");
        pre.push_back(root);
        let mut ordered = Vec::new();
        while let Some(node) = pre.pop_front() {
            ordered.push(node);
            for i in (0..node.children_size()).rev() {
                pre.push_front(self.apply(node.child_at(i)));
            }
        }
        ordered.sort_by(position_key_cmp);
        self.pending = ordered.into();
        self.preloaded = true;
    }

    fn next_position_order(&mut self) -> Option<H> {
        if !self.preloaded {
            self.preload_position_order();
        }
        self.pending.pop_front()
    }
}

/// Comparison key per node: startOffset when both nodes have one, else
/// (startLine, startCol) with absent components treated as 0. `sort_by` is a
/// stable mergesort, so ties preserve pre-order insertion order.
fn position_key_cmp<H: UastNode>(a: &H, b: &H) -> std::cmp::Ordering {
    if a.has_start_offset() && b.has_start_offset() {
        a.start_offset().cmp(&b.start_offset())
    } else {
        let a_key = (
            if a.has_start_line() { a.start_line() } else { 0 },
            if a.has_start_col() { a.start_col() } else { 0 },
        );
        let b_key = (
            if b.has_start_line() { b.start_line() } else { 0 },
            if b.has_start_col() { b.start_col() } else { 0 },
        );
        a_key.cmp(&b_key)
    }
}

impl<H: UastNode, F: Fn(H) -> H> Iterator for NodeIterator<H, F> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        match self.order {
            TraversalOrder::PreOrder => self.next_pre_order(),
            TraversalOrder::LevelOrder => self.next_level_order(),
            TraversalOrder::PostOrder => self.next_post_order(),
            TraversalOrder::PositionOrder => self.next_position_order(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn types(nodes: impl IntoIterator<Item = fixtures::Node<'static>>) -> Vec<&'static str> {
        nodes.into_iter().map(|n| n.internal_type()).collect()
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        let tree = Box::leak(Box::new(fixtures::sample()));
        let it = NodeIterator::new(tree.root(), TraversalOrder::PreOrder);
        assert_eq!(
            types(it),
            vec!["Module", "Identifier", "BinaryOp", "Literal"]
        );
    }

    #[test]
    fn level_order_visits_breadth_first() {
        let tree = Box::leak(Box::new(fixtures::sample()));
        let it = NodeIterator::new(tree.root(), TraversalOrder::LevelOrder);
        assert_eq!(
            types(it),
            vec!["Module", "Identifier", "BinaryOp", "Literal"]
        );
    }

    #[test]
    fn post_order_visits_children_before_parent() {
        let tree = Box::leak(Box::new(fixtures::sample()));
        let it = NodeIterator::new(tree.root(), TraversalOrder::PostOrder);
        assert_eq!(
            types(it),
            vec!["Identifier", "Literal", "BinaryOp", "Module"]
        );
    }

    #[test]
    fn linear_chain_orders_agree_on_strictly_ordered_tree() {
        let tree = Box::leak(Box::new(fixtures::chain()));
        let pre = types(NodeIterator::new(tree.root(), TraversalOrder::PreOrder));
        let post = types(NodeIterator::new(tree.root(), TraversalOrder::PostOrder));
        let level = types(NodeIterator::new(tree.root(), TraversalOrder::LevelOrder));
        assert_eq!(pre, vec!["A", "B", "C"]);
        assert_eq!(post, vec!["C", "B", "A"]);
        assert_eq!(level, vec!["A", "B", "C"]);
    }

    #[test]
    fn position_order_sorts_by_offset_with_stable_ties() {
        let tree = Box::leak(Box::new(fixtures::position_scenario()));
        let it = NodeIterator::new(tree.root(), TraversalOrder::PositionOrder);
        let emitted: Vec<_> = it.collect();
        // Root has no offset (key (0,0)); the offset=5 Lit sorts before the
        // offset=10 Lit; the offset-less Lit falls back to (0,0) and ties with
        // Root, so pre-order insertion keeps Root ahead of it.
        assert_eq!(
            emitted.iter().map(|n| n.start_offset()).collect::<Vec<_>>(),
            vec![0, 5, 10, 0]
        );
        assert_eq!(emitted[0].internal_type(), "Root");
        assert_eq!(emitted[3].internal_type(), "Lit");
        assert!(!emitted[3].has_start_offset());
    }

    #[test]
    fn identity_transform_matches_untransformed_traversal() {
        let tree = Box::leak(Box::new(fixtures::sample()));
        let plain: Vec<_> = NodeIterator::new(tree.root(), TraversalOrder::PreOrder).collect();
        let transformed: Vec<_> =
            NodeIterator::with_transform(tree.root(), TraversalOrder::PreOrder, |n| n).collect();
        assert_eq!(plain, transformed);
    }

    #[test]
    fn post_order_terminates_on_self_referential_node() {
        let tree = Box::leak(Box::new(fixtures::self_referential()));
        let mut it = NodeIterator::new(tree.root(), TraversalOrder::PostOrder);
        assert_eq!(it.next().unwrap().internal_type(), "Cycle");
        assert!(it.next().is_none());
    }

    #[test]
    fn exhausted_iterator_keeps_returning_none() {
        let tree = Box::leak(Box::new(fixtures::sample()));
        let mut it = NodeIterator::new(tree.root(), TraversalOrder::PreOrder);
        for _ in 0..4 {
            assert!(it.next().is_some());
        }
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
