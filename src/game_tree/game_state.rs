use crate::error::{Error, Result};
use std::fmt::Debug;

/// A turn-based game position. Agents move in the fixed order `0..N`, then
/// play returns to agent 0; agent 0 is the one being controlled.
pub trait GameState: Sized {
    /// Actions are ordered so that root decisions with tied values are
    /// reproducible.
    type Action: Clone + Ord + Debug;

    fn num_agents(&self) -> usize;

    fn legal_actions(&self, agent_index: usize) -> Vec<Self::Action>;

    fn generate_successor(&self, agent_index: usize, action: &Self::Action) -> Self;

    fn is_over(&self) -> bool;

    /// Whether `action` is the no-op that is never searched.
    fn is_stop(&self, _action: &Self::Action) -> bool {
        false
    }
}

/// Static evaluation of a cut-off or finished state, from agent 0's point of
/// view.
pub trait Evaluator<G> {
    fn evaluate(&mut self, state: &G) -> f64;
}

impl<G, F: FnMut(&G) -> f64> Evaluator<G> for F {
    fn evaluate(&mut self, state: &G) -> f64 {
        self(state)
    }
}

/// Whose move it is and how many full rounds lie above this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Turn {
    pub agent_index: usize,
    pub depth: usize,
    num_agents: usize,
}

impl Turn {
    pub fn root(num_agents: usize) -> Self {
        Self {
            agent_index: 0,
            depth: 0,
            num_agents,
        }
    }

    /// The turn after this one. Depth only grows when play wraps back to
    /// agent 0.
    pub fn next(self) -> Self {
        let agent_index = (self.agent_index + 1) % self.num_agents;
        let depth = if agent_index == 0 {
            self.depth + 1
        } else {
            self.depth
        };
        Self {
            agent_index,
            depth,
            ..self
        }
    }

    pub fn is_max(&self) -> bool {
        self.agent_index == 0
    }
}

/// Legal actions of the agent to move, without the stop action.
pub(crate) fn expand<G: GameState>(state: &G, agent_index: usize) -> Vec<G::Action> {
    let mut actions = state.legal_actions(agent_index);
    actions.retain(|action| !state.is_stop(action));
    actions
}

pub(crate) fn is_cutoff<G: GameState>(state: &G, turn: Turn, tree_depth: usize) -> bool {
    state.is_over() || turn.depth >= tree_depth
}

/// Actions the controlled agent can choose between at the root, and the
/// root turn.
pub(crate) fn root_actions<G: GameState>(state: &G) -> Result<(Vec<G::Action>, Turn)> {
    let num_agents = state.num_agents();
    if num_agents == 0 {
        return Err(Error::InvalidAgentIndex {
            index: 0,
            num_agents,
        });
    }
    let actions = expand(state, 0);
    if actions.is_empty() {
        return Err(Error::NoLegalActions { agent_index: 0 });
    }
    Ok((actions, Turn::root(num_agents)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_advances_on_wrap_only() {
        let turn = Turn::root(3);
        let turn = turn.next();
        assert_eq!((turn.agent_index, turn.depth), (1, 0));
        let turn = turn.next();
        assert_eq!((turn.agent_index, turn.depth), (2, 0));
        let turn = turn.next();
        assert_eq!((turn.agent_index, turn.depth), (0, 1));
        assert!(turn.is_max());
    }

    #[test]
    fn single_agent_advances_every_move() {
        let turn = Turn::root(1).next();
        assert_eq!((turn.agent_index, turn.depth), (0, 1));
    }
}
