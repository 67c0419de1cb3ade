use crate::board::{Board, Color, Placement};
use crate::mcts_node::{MctsNode, uct_score};
use crate::random::take_random;
use ego_tree::{NodeId, NodeRef, Tree};
use rand::Rng;
use std::cmp::Reverse;

/// The search tree: an arena of [`MctsNode`]s addressed by [`NodeId`] handles.
///
/// Children are kept in expansion order and every node can reach its parent, which is all
/// backpropagation needs. The tree only ever grows.
pub struct SearchTree {
    tree: Tree<MctsNode>,
    len: usize,
}

impl SearchTree {
    /// Creates a tree whose root stands for `board`, reached by a placement of `mover`.
    pub fn new<B: Board>(board: &B, mover: Color) -> Self {
        Self {
            tree: Tree::new(MctsNode::new(board, mover, None)),
            len: 1,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the data of a node.
    pub fn get(&self, id: NodeId) -> &MctsNode {
        self.node(id).value()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent().map(|parent| parent.id())
    }

    /// Returns the children of a node in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).children().map(|child| child.id())
    }

    /// Returns the data of every node, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &MctsNode> + '_ {
        self.tree.values()
    }

    pub fn has_untried_moves(&self, id: NodeId) -> bool {
        self.get(id).has_untried_moves()
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).has_children()
    }

    /// Removes a uniformly chosen untried reply of `id` and returns it as a placement of the
    /// side to move there. Returns `None` once every reply has been expanded.
    pub fn pop_untried_move<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        rng: &mut R,
    ) -> Option<Placement> {
        let mut node = self.node_mut(id);
        let data = node.value();
        let color = data.mover.opponent();
        take_random(&mut data.untried_moves, rng).map(|cell| Placement::new(cell, color))
    }

    /// Appends a child reached by `placement`, where `board_after` is the position after it.
    pub fn add_child<B: Board>(
        &mut self,
        parent: NodeId,
        board_after: &B,
        placement: Placement,
    ) -> NodeId {
        let child = MctsNode::new(board_after, placement.color, Some(placement));
        let id = self.node_mut(parent).append(child).id();
        self.len += 1;
        id
    }

    pub fn update(&mut self, id: NodeId, did_win: bool) {
        self.node_mut(id).value().update(did_win);
    }

    /// Records a simulation won by `winner` on `from` and all of its ancestors. Returns the
    /// number of nodes updated.
    pub fn backpropagate(&mut self, from: NodeId, winner: Color) -> usize {
        let path: Vec<NodeId> = std::iter::once(from)
            .chain(self.node(from).ancestors().map(|node| node.id()))
            .collect();
        for &id in &path {
            let mut node = self.node_mut(id);
            let data = node.value();
            let did_win = data.mover == winner;
            data.update(did_win);
        }
        path.len()
    }

    /// Picks the child with the highest UCT score; the first one in expansion order wins ties.
    ///
    /// Every child must have been visited at least once.
    pub fn uct_child(&self, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.node(id);
        let parent_visits = node.value().visits;
        let mut best: Option<(NodeId, f64)> = None;
        for child in node.children() {
            let data = child.value();
            debug_assert!(data.visits > 0, "BUG: scoring a child that was never simulated");
            let score = uct_score(parent_visits, data.wins, data.visits, exploration_constant);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((child.id(), score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Picks the child with the most visits; the lowest cell wins ties.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .children()
            .max_by_key(|child| {
                let data = child.value();
                (data.visits, Reverse(data.placement.map(|p| p.cell)))
            })
            .map(|child| child.id())
    }

    fn node(&self, id: NodeId) -> NodeRef<'_, MctsNode> {
        self.tree.get(id).expect("BUG: node id from another tree")
    }

    fn node_mut(&mut self, id: NodeId) -> ego_tree::NodeMut<'_, MctsNode> {
        self.tree.get_mut(id).expect("BUG: node id from another tree")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::nogo::NoGoBoard;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(tree: &mut SearchTree, id: NodeId, wins: u32, visits: u32) {
        for i in 0..visits {
            tree.update(id, i < wins);
        }
    }

    #[test]
    fn uct_child_picks_the_higher_score() {
        // arrange
        let board = NoGoBoard::new(3, 3);
        let mut tree = SearchTree::new(&board, Color::White);
        let root = tree.root_id();
        let a = tree.add_child(root, &board, Placement::new(0, Color::Black));
        let b = tree.add_child(root, &board, Placement::new(1, Color::Black));
        record(&mut tree, a, 5, 10);
        record(&mut tree, b, 1, 2);
        record(&mut tree, root, 0, 12);

        // act
        let selected = tree.uct_child(root, 0.25);

        // assert
        assert_eq!(selected, Some(b));
        assert_eq!(tree.uct_child(root, 0.0), Some(a));
    }

    #[test]
    fn uct_child_keeps_the_first_of_equal_scores() {
        let board = NoGoBoard::new(3, 3);
        let mut tree = SearchTree::new(&board, Color::White);
        let root = tree.root_id();
        let first = tree.add_child(root, &board, Placement::new(7, Color::Black));
        let second = tree.add_child(root, &board, Placement::new(2, Color::Black));
        record(&mut tree, first, 1, 3);
        record(&mut tree, second, 1, 3);
        record(&mut tree, root, 3, 6);

        assert_eq!(tree.uct_child(root, 0.25), Some(first));
    }

    #[test]
    fn uct_child_of_a_leaf_is_none() {
        let tree = SearchTree::new(&NoGoBoard::new(2, 2), Color::White);

        assert_eq!(tree.uct_child(tree.root_id(), 0.25), None);
        assert!(!tree.has_children(tree.root_id()));
    }

    #[test]
    fn most_visited_child_breaks_ties_by_lowest_cell() {
        let board = NoGoBoard::new(3, 3);
        let mut tree = SearchTree::new(&board, Color::White);
        let root = tree.root_id();
        let high = tree.add_child(root, &board, Placement::new(5, Color::Black));
        let low = tree.add_child(root, &board, Placement::new(2, Color::Black));
        let rare = tree.add_child(root, &board, Placement::new(0, Color::Black));
        record(&mut tree, high, 4, 4);
        record(&mut tree, low, 0, 4);
        record(&mut tree, rare, 1, 1);

        assert_eq!(tree.most_visited_child(root), Some(low));
    }

    #[test]
    fn popped_moves_are_placements_of_the_side_to_move() {
        // arrange
        let board = NoGoBoard::new(2, 2);
        let mut tree = SearchTree::new(&board, Color::White);
        let root = tree.root_id();
        let mut rng = StdRng::seed_from_u64(1);

        // act
        let mut popped = Vec::new();
        while let Some(placement) = tree.pop_untried_move(root, &mut rng) {
            popped.push(placement);
        }
        popped.sort_by_key(|p| p.cell);

        // assert
        assert_eq!(
            popped,
            (0..4).map(|cell| Placement::new(cell, Color::Black)).collect::<Vec<_>>()
        );
        assert!(!tree.has_untried_moves(root));
    }

    #[test]
    fn backpropagate_credits_the_matching_mover() {
        // arrange
        let mut board = NoGoBoard::new(3, 3);
        let mut tree = SearchTree::new(&board, Color::White);
        let root = tree.root_id();
        let black = Placement::new(4, Color::Black);
        board.place(black);
        let child = tree.add_child(root, &board, black);
        let white = Placement::new(0, Color::White);
        board.place(white);
        let grandchild = tree.add_child(child, &board, white);

        // act
        let updated = tree.backpropagate(grandchild, Color::Black);

        // assert
        assert_eq!(updated, 3);
        assert_eq!((tree.get(root).wins, tree.get(root).visits), (0, 1));
        assert_eq!((tree.get(child).wins, tree.get(child).visits), (1, 1));
        assert_eq!((tree.get(grandchild).wins, tree.get(grandchild).visits), (0, 1));
        assert_eq!(tree.parent(grandchild), Some(child));
        assert_eq!(tree.len(), 3);
    }
}
