//! Sequential decision making: offline value iteration over a known
//! [`MarkovDecisionProcess`], and online Q-learning with either a table or a
//! linear function of features behind it.

mod features;
mod linear;
mod mdp;
mod q_function;
mod q_learning;
mod value_iteration;

pub use features::{FeatureExtractor, Features, IdentityExtractor};
pub use linear::{LinearQFunction, DEFAULT_WEIGHT};
pub use mdp::MarkovDecisionProcess;
pub use q_function::{QFunction, QTable};
pub use q_learning::{ApproximateQAgent, QLearningAgent, TabularQAgent};
pub use value_iteration::ValueIterationAgent;
