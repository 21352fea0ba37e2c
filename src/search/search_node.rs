use crate::search::HeuristicValue;
use ordered_float::OrderedFloat;

/// A [`SearchNode`] is an entry of the frontier: a state together with the
/// actions that reached it from the start and what they cost. Unlike a node in
/// a shared search space it owns its whole path, so it can be dropped as soon
/// as it is popped.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// State this node stands for
    state: S,
    /// Actions taken from the starting state, in order
    actions: Vec<A>,
    /// G-value of the node, i.e. the cost to reach this node.
    g: HeuristicValue,
}

impl<S, A: Clone> SearchNode<S, A> {
    /// Create the node for the starting state. For all other nodes see
    /// [`SearchNode::child`].
    pub fn root(state: S) -> Self {
        Self {
            state,
            actions: vec![],
            g: OrderedFloat(0.),
        }
    }

    /// Create the node reached from `self` by taking `action` at `cost`.
    pub fn child(&self, state: S, action: A, cost: f64) -> Self {
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend_from_slice(&self.actions);
        actions.push(action);
        Self {
            state,
            actions,
            g: self.g + cost,
        }
    }

    pub fn get_state(&self) -> &S {
        &self.state
    }

    pub fn get_g(&self) -> HeuristicValue {
        self.g
    }

    pub fn depth(&self) -> usize {
        self.actions.len()
    }

    pub fn into_actions(self) -> Vec<A> {
        self.actions
    }
}
