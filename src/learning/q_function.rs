use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// Storage behind a Q-learning agent. The agent computes the temporal
/// difference target and hands it over; the backend decides how to move its
/// estimate towards it.
pub trait QFunction<S, A>: Debug {
    fn q_value(&self, state: &S, action: &A) -> f64;

    /// Move the estimate of `Q(state, action)` towards `target` with learning
    /// rate `alpha`.
    fn observe(&mut self, state: &S, action: &A, target: f64, alpha: f64);

    /// Called once when the agent's training episodes run out.
    fn on_training_finished(&self) {}
}

/// One value per (state, action) pair, 0.0 until first updated.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable<S: Eq + Hash, A: Eq + Hash> {
    q_values: HashMap<(S, A), f64>,
}

impl<S: Eq + Hash, A: Eq + Hash> Default for QTable<S, A> {
    fn default() -> Self {
        Self {
            q_values: HashMap::new(),
        }
    }
}

impl<S: Eq + Hash, A: Eq + Hash> QTable<S, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs updated at least once.
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(S, A), &f64)> {
        self.q_values.iter()
    }
}

impl<S, A> QFunction<S, A> for QTable<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    fn q_value(&self, state: &S, action: &A) -> f64 {
        self.q_values
            .get(&(state.clone(), action.clone()))
            .copied()
            .unwrap_or(0.)
    }

    fn observe(&mut self, state: &S, action: &A, target: f64, alpha: f64) {
        let q_value = self
            .q_values
            .entry((state.clone(), action.clone()))
            .or_insert(0.);
        *q_value = (1. - alpha) * *q_value + alpha * target;
    }
}
