//! Depth-limited search over turn-based multi-agent games.
//!
//! Every strategy runs the same three steps at a node: a cutoff test (the
//! game is over or the depth limit is reached, so the node is scored by the
//! evaluator), expansion over the moving agent's legal actions minus the stop
//! action, and a combination rule that depends on the strategy and on who is
//! moving. One unit of depth is a full round in which every agent moves once.

mod alpha_beta;
mod expectimax;
mod game_state;
mod minimax;
mod multi_agent_search;

pub use alpha_beta::AlphaBetaAgent;
pub use expectimax::ExpectimaxAgent;
pub use game_state::{Evaluator, GameState};
pub use minimax::MinimaxAgent;
pub use multi_agent_search::{Decision, GameTreeStrategyName, MultiAgentSearch};
