use crate::error::{Error, Result};
use crate::game_tree::{
    game_state::{expand, is_cutoff, root_actions, Turn},
    Decision, Evaluator, GameState, MultiAgentSearch,
};
use std::fmt::{self, Debug};
use tracing::debug;

/// Minimax with alpha-beta pruning. Decisions and values are the same as
/// [`crate::game_tree::MinimaxAgent`]'s, only fewer nodes are visited.
pub struct AlphaBetaAgent<E> {
    evaluator: E,
    tree_depth: usize,
    nodes_visited: usize,
    prunes: usize,
}

impl<E> AlphaBetaAgent<E> {
    pub fn new(evaluator: E, tree_depth: usize) -> Self {
        Self {
            evaluator,
            tree_depth,
            nodes_visited: 0,
            prunes: 0,
        }
    }

    pub fn tree_depth(&self) -> usize {
        self.tree_depth
    }

    /// Value of `state` within the window `(alpha, beta)`. Outside the window
    /// the returned value is only a bound, on the same side as the true one.
    fn value<G>(&mut self, state: &G, turn: Turn, mut alpha: f64, mut beta: f64) -> f64
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

        let maximising = turn.is_max();
        let mut value = if maximising {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let num_actions = actions.len();
        for (i, action) in actions.iter().enumerate() {
            let successor = state.generate_successor(turn.agent_index, action);
            let child_value = self.value(&successor, turn.next(), alpha, beta);
            if maximising {
                value = value.max(child_value);
                if value >= beta {
                    self.record_prune(i, num_actions);
                    return value;
                }
                alpha = alpha.max(value);
            } else {
                value = value.min(child_value);
                if value <= alpha {
                    self.record_prune(i, num_actions);
                    return value;
                }
                beta = beta.min(value);
            }
        }
        value
    }

    fn record_prune(&mut self, index: usize, num_actions: usize) {
        // returning after the last child skips nothing
        if index + 1 < num_actions {
            self.prunes += 1;
        }
    }
}

impl<G, E> MultiAgentSearch<G> for AlphaBetaAgent<E>
where
    G: GameState,
    E: Evaluator<G>,
{
    fn decide(&mut self, state: &G) -> Result<Decision<G::Action>> {
        let (mut actions, root) = root_actions(state)?;
        self.nodes_visited = 1;
        self.prunes = 0;

        // greatest action first and replace only on a strictly better value,
        // so ties resolve the way minimax resolves them
        actions.sort_by(|a, b| b.cmp(a));
        let mut alpha = f64::NEG_INFINITY;
        let mut best: Option<(G::Action, f64)> = None;
        for action in actions {
            let successor = state.generate_successor(root.agent_index, &action);
            let value = self.value(&successor, root.next(), alpha, f64::INFINITY);
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                alpha = alpha.max(value);
                best = Some((action, value));
            }
        }

        let (action, value) = best.ok_or(Error::NoLegalActions { agent_index: 0 })?;
        debug!(
            ?action,
            value,
            nodes_visited = self.nodes_visited,
            prunes = self.prunes,
            "alpha-beta decision"
        );
        Ok(Decision {
            action,
            value,
            nodes_visited: self.nodes_visited,
            prunes: self.prunes,
        })
    }
}

impl<E> Debug for AlphaBetaAgent<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaBetaAgent")
            .field("tree_depth", &self.tree_depth)
            .finish_non_exhaustive()
    }
}
