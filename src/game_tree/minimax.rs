use crate::error::{Error, Result};
use crate::game_tree::{
    game_state::{expand, is_cutoff, root_actions, Turn},
    Decision, Evaluator, GameState, MultiAgentSearch,
};
use ordered_float::OrderedFloat;
use std::fmt::{self, Debug};
use tracing::debug;

/// Depth-limited minimax: agent 0 takes the best value for itself, every
/// other agent the worst.
pub struct MinimaxAgent<E> {
    evaluator: E,
    tree_depth: usize,
    nodes_visited: usize,
}

impl<E> MinimaxAgent<E> {
    pub fn new(evaluator: E, tree_depth: usize) -> Self {
        Self {
            evaluator,
            tree_depth,
            nodes_visited: 0,
        }
    }

    pub fn tree_depth(&self) -> usize {
        self.tree_depth
    }

    fn value<G>(&mut self, state: &G, turn: Turn) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        self.nodes_visited += 1;
        if is_cutoff(state, turn, self.tree_depth) {
            return self.evaluator.evaluate(state);
        }
        let actions = expand(state, turn.agent_index);
        if actions.is_empty() {
            return self.evaluator.evaluate(state);
        }

        let values = actions.iter().map(|action| {
            let successor = state.generate_successor(turn.agent_index, action);
            self.value(&successor, turn.next())
        });
        if turn.is_max() {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }
}

impl<G, E> MultiAgentSearch<G> for MinimaxAgent<E>
where
    G: GameState,
    E: Evaluator<G>,
{
    fn decide(&mut self, state: &G) -> Result<Decision<G::Action>> {
        let (actions, root) = root_actions(state)?;
        self.nodes_visited = 1;

        // the greatest (value, action) pair, so tied values go to the
        // greatest action
        let (value, action) = actions
            .into_iter()
            .map(|action| {
                let successor = state.generate_successor(root.agent_index, &action);
                (OrderedFloat(self.value(&successor, root.next())), action)
            })
            .max()
            .ok_or(Error::NoLegalActions { agent_index: 0 })?;

        debug!(
            ?action,
            value = value.into_inner(),
            nodes_visited = self.nodes_visited,
            "minimax decision"
        );
        Ok(Decision {
            action,
            value: value.into_inner(),
            nodes_visited: self.nodes_visited,
            prunes: 0,
        })
    }
}

impl<E> Debug for MinimaxAgent<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinimaxAgent")
            .field("tree_depth", &self.tree_depth)
            .finish_non_exhaustive()
    }
}
