use std::{fmt::Debug, hash::Hash};

/// One outgoing transition of a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
    /// Non-negative cost of taking `action`.
    pub cost: f64,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// A path-finding problem. Implementations are owned by the caller; the
/// search engines only ever read from them, so expanding the same state twice
/// must give the same successors.
pub trait SearchProblem {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + PartialEq + Debug;

    fn starting_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn successor_states(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;
}

/// Follow `actions` from the starting state, returning the final state and
/// the accumulated cost. `None` if some action is not available in the state
/// it is taken from.
fn replay<P: SearchProblem>(problem: &P, actions: &[P::Action]) -> Option<(P::State, f64)> {
    let mut state = problem.starting_state();
    let mut cost = 0.;
    for action in actions {
        let successor = problem
            .successor_states(&state)
            .into_iter()
            .find(|successor| &successor.action == action)?;
        cost += successor.cost;
        state = successor.state;
    }
    Some((state, cost))
}

/// Total cost of executing `actions` from the starting state.
pub fn path_cost<P: SearchProblem>(problem: &P, actions: &[P::Action]) -> Option<f64> {
    replay(problem, actions).map(|(_, cost)| cost)
}

/// Whether `actions` is executable and ends in a goal state.
pub fn reaches_goal<P: SearchProblem>(problem: &P, actions: &[P::Action]) -> bool {
    replay(problem, actions).is_some_and(|(state, _)| problem.is_goal(&state))
}
