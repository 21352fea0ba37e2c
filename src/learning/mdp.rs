use std::{fmt::Debug, hash::Hash};

/// A fully known Markov decision process. Value iteration reads the whole
/// model; the Q-learning agents never see it and learn from sampled
/// transitions instead.
pub trait MarkovDecisionProcess {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + PartialEq + Debug;

    /// Every state of the process, terminal ones included.
    fn states(&self) -> Vec<Self::State>;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// The actions available in `state`. Empty for terminal states.
    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Each reachable next state with its probability. The probabilities sum
    /// to one.
    fn transition_states_and_probs(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<(Self::State, f64)>;

    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f64;
}
