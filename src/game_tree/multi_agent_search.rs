use crate::config::GameTreeConfig;
use crate::error::Result;
use crate::game_tree::{AlphaBetaAgent, Evaluator, ExpectimaxAgent, GameState, MinimaxAgent};
use serde::{Deserialize, Serialize};

/// The outcome of one root search.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    /// Backed up value of `action` at the root.
    pub value: f64,
    /// Nodes evaluated, the root included.
    pub nodes_visited: usize,
    /// Nodes that returned before looking at all their children. Only
    /// alpha-beta prunes.
    pub prunes: usize,
}

pub trait MultiAgentSearch<G: GameState> {
    /// Search from `state` for agent 0. Fails when agent 0 has nothing to do
    /// at the root.
    fn decide(&mut self, state: &G) -> Result<Decision<G::Action>>;

    fn get_action(&mut self, state: &G) -> Result<G::Action> {
        self.decide(state).map(|decision| decision.action)
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum GameTreeStrategyName {
    #[clap(help = "Agent 0 maximises, every other agent minimises.")]
    Minimax,
    #[clap(help = "Minimax with alpha-beta pruning.")]
    AlphaBeta,
    #[clap(help = "Agent 0 maximises, every other agent moves uniformly at random.")]
    Expectimax,
}

impl GameTreeStrategyName {
    pub fn create<'a, G, E>(
        &self,
        evaluator: E,
        tree_depth: usize,
    ) -> Box<dyn MultiAgentSearch<G> + 'a>
    where
        G: GameState + 'a,
        E: Evaluator<G> + 'a,
    {
        match self {
            GameTreeStrategyName::Minimax => Box::new(MinimaxAgent::new(evaluator, tree_depth)),
            GameTreeStrategyName::AlphaBeta => Box::new(AlphaBetaAgent::new(evaluator, tree_depth)),
            GameTreeStrategyName::Expectimax => {
                Box::new(ExpectimaxAgent::new(evaluator, tree_depth))
            }
        }
    }
}

impl GameTreeConfig {
    pub fn create<'a, G, E>(&self, evaluator: E) -> Box<dyn MultiAgentSearch<G> + 'a>
    where
        G: GameState + 'a,
        E: Evaluator<G> + 'a,
    {
        self.strategy.create(evaluator, self.tree_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn config_builds_each_strategy() {
        let expected = [
            (GameTreeStrategyName::Minimax, 3.),
            (GameTreeStrategyName::AlphaBeta, 3.),
            (GameTreeStrategyName::Expectimax, 23. / 3.),
        ];
        for (strategy, value) in expected {
            let config = GameTreeConfig {
                strategy,
                tree_depth: 1,
            };
            let mut agent: Box<dyn MultiAgentSearch<TreeGame>> = config.create(leaf_value);
            let decision = agent.decide(&textbook_tree()).unwrap();
            assert_eq!(decision.action, 0, "{:?}", strategy);
            assert!((decision.value - value).abs() < 1e-9, "{:?}", strategy);
            assert_eq!(agent.get_action(&textbook_tree()).unwrap(), 0);
        }
    }
}
