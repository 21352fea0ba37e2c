use crate::error::{Error, Result};
use crate::game_tree::{
    game_state::{expand, is_cutoff, root_actions, Turn},
    Decision, Evaluator, GameState, MultiAgentSearch,
};
use ordered_float::OrderedFloat;
use std::fmt::{self, Debug};
use tracing::debug;

/// Agent 0 maximises; every other agent is modelled as picking uniformly at
/// random among its legal actions, so their nodes back up the mean of their
/// children.
pub struct ExpectimaxAgent<E> {
    evaluator: E,
    tree_depth: usize,
    nodes_visited: usize,
}

impl<E> ExpectimaxAgent<E> {
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

        let probability = 1. / actions.len() as f64;
        let values = actions.iter().map(|action| {
            let successor = state.generate_successor(turn.agent_index, action);
            self.value(&successor, turn.next())
        });
        if turn.is_max() {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.map(|value| probability * value).sum()
        }
    }
}

impl<G, E> MultiAgentSearch<G> for ExpectimaxAgent<E>
where
    G: GameState,
    E: Evaluator<G>,
{
    fn decide(&mut self, state: &G) -> Result<Decision<G::Action>> {
        let (actions, root) = root_actions(state)?;
        self.nodes_visited = 1;

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
            "expectimax decision"
        );
        Ok(Decision {
            action,
            value: value.into_inner(),
            nodes_visited: self.nodes_visited,
            prunes: 0,
        })
    }
}

impl<E> Debug for ExpectimaxAgent<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpectimaxAgent")
            .field("tree_depth", &self.tree_depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_tree::MinimaxAgent;
    use crate::test_utils::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Expected leaf value below `tree` when every move is made uniformly at
    /// random, by listing every root-to-leaf path with its probability.
    fn enumerate_chance(tree: &Tree) -> f64 {
        let mut paths = vec![(tree, 1.)];
        let mut expectation = 0.;
        while let Some((node, probability)) = paths.pop() {
            match node {
                Tree::Leaf(value) => expectation += probability * value,
                // nobody can move, the node is scored where it stands
                Tree::Branch { children, estimate } if children.is_empty() => {
                    expectation += probability * estimate
                }
                Tree::Branch { children, .. } => {
                    let share = probability / children.len() as f64;
                    paths.extend(children.iter().map(|(_, child)| (child, share)));
                }
            }
        }
        expectation
    }

    #[test]
    fn chance_nodes_average_their_children() {
        // agent 0 picks, agents 1 and 2 move at random, then the game ends
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let game = random_tree_game(&mut rng, 3, 1);
            let Tree::Branch { children, .. } = game.tree() else {
                continue;
            };
            if children.is_empty() {
                continue;
            }
            let oracle = children
                .iter()
                .map(|(_, child)| enumerate_chance(child))
                .fold(f64::NEG_INFINITY, f64::max);
            let decision = ExpectimaxAgent::new(leaf_value, 1).decide(&game).unwrap();
            assert_approx_eq!(decision.value, oracle);
        }
    }

    #[test]
    fn textbook_tree_prefers_the_best_average() {
        let game = textbook_tree();
        // averages are 23/3, 4 and 7
        let decision = ExpectimaxAgent::new(leaf_value, 1).decide(&game).unwrap();
        assert_eq!(decision.action, 0);
        assert_approx_eq!(decision.value, 23. / 3.);

        // minimax would pick the same branch but value it at its minimum
        let minimax = MinimaxAgent::new(leaf_value, 1).decide(&game).unwrap();
        assert_eq!(minimax.value, 3.);
    }

    #[test]
    fn single_agent_is_plain_maximisation() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let rounds = rng.random_range(1..=3);
            let game = random_tree_game(&mut rng, 1, rounds);
            let expected = MinimaxAgent::new(leaf_value, rounds)
                .decide(&game)
                .unwrap();
            let actual = ExpectimaxAgent::new(leaf_value, rounds)
                .decide(&game)
                .unwrap();
            assert_eq!(actual.action, expected.action);
            assert_eq!(actual.value, expected.value);
        }
    }

    #[test]
    fn stop_is_excluded_from_the_average() {
        let game = TreeGame::new(
            2,
            branch(vec![(
                0,
                branch(vec![(STOP, leaf(-100.)), (1, leaf(2.)), (2, leaf(4.))]),
            )]),
        )
        .with_stop();
        let decision = ExpectimaxAgent::new(leaf_value, 1).decide(&game).unwrap();
        assert_approx_eq!(decision.value, 3.);
    }
}
