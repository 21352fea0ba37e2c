use crate::config::ValueIterationConfig;
use crate::error::Result;
use crate::learning::MarkovDecisionProcess;
use std::collections::HashMap;
use tracing::{debug, info};

/// Offline planner that computes state values for a known MDP by repeated
/// synchronous Bellman optimality sweeps. All the work happens in
/// [`ValueIterationAgent::new`]; afterwards the agent only answers queries
/// against the converged table.
#[derive(Debug)]
pub struct ValueIterationAgent<M: MarkovDecisionProcess> {
    mdp: M,
    discount_rate: f64,
    values: HashMap<M::State, f64>,
    /// Largest absolute value change of each sweep, in order.
    residuals: Vec<f64>,
}

impl<M: MarkovDecisionProcess> ValueIterationAgent<M> {
    pub fn new(mdp: M, config: ValueIterationConfig) -> Result<Self> {
        config.validate()?;
        let mut agent = Self {
            mdp,
            discount_rate: config.discount_rate,
            values: HashMap::new(),
            residuals: Vec::with_capacity(config.iterations),
        };

        for iteration in 0..config.iterations {
            let residual = agent.sweep();
            debug!(iteration, residual, "value iteration sweep");
            agent.residuals.push(residual);
            if config.tolerance.is_some_and(|tolerance| residual <= tolerance) {
                break;
            }
        }

        info!(
            sweeps = agent.residuals.len(),
            residual = agent.residuals.last().copied().unwrap_or(0.),
            num_states = agent.values.len(),
            "value iteration finished"
        );
        Ok(agent)
    }

    /// One synchronous sweep: every new value is computed from the previous
    /// table only, which is replaced once the sweep completes.
    fn sweep(&mut self) -> f64 {
        let mut next_values = HashMap::with_capacity(self.values.len());
        let mut residual: f64 = 0.;
        for state in self.mdp.states() {
            let value = self
                .best_action_and_value(&state)
                .map_or(0., |(_, value)| value);
            residual = residual.max((value - self.get_value(&state)).abs());
            next_values.insert(state, value);
        }
        self.values = next_values;
        residual
    }

    /// First action of maximal Q-value. `None` for terminal states and states
    /// without actions.
    fn best_action_and_value(&self, state: &M::State) -> Option<(M::Action, f64)> {
        if self.mdp.is_terminal(state) {
            return None;
        }
        let mut best: Option<(M::Action, f64)> = None;
        for action in self.mdp.possible_actions(state) {
            let q_value = self.get_q_value(state, &action);
            if best.as_ref().map_or(true, |(_, value)| q_value > *value) {
                best = Some((action, q_value));
            }
        }
        best
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn get_value(&self, state: &M::State) -> f64 {
        self.values.get(state).copied().unwrap_or(0.)
    }

    /// `Σ P(s' | s, a) · (R(s, a, s') + γ V(s'))`, computed on demand from
    /// the current table.
    pub fn get_q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        self.mdp
            .transition_states_and_probs(state, action)
            .iter()
            .map(|(next_state, probability)| {
                probability
                    * (self.mdp.reward(state, action, next_state)
                        + self.discount_rate * self.get_value(next_state))
            })
            .sum()
    }

    pub fn get_policy(&self, state: &M::State) -> Option<M::Action> {
        self.best_action_and_value(state).map(|(action, _)| action)
    }

    /// Value iteration acts greedily with respect to its values.
    pub fn get_action(&self, state: &M::State) -> Option<M::Action> {
        self.get_policy(state)
    }
}
