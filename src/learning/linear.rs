use crate::learning::{FeatureExtractor, Features, QFunction};
use itertools::Itertools;
use std::collections::HashMap;
use tracing::info;

/// Weight a feature starts with the first time it is seen.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Linear function approximation: `Q(s, a) = Σ w_f · f(s, a)` over the
/// features produced by `E`.
#[derive(Debug, Clone)]
pub struct LinearQFunction<E> {
    extractor: E,
    weights: HashMap<String, f64>,
}

impl<E> LinearQFunction<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            weights: HashMap::new(),
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn weights(&self) -> &HashMap<String, f64> {
        &self.weights
    }

    pub fn weight(&self, feature: &str) -> f64 {
        self.weights.get(feature).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    fn dot(&self, features: &Features) -> f64 {
        features
            .iter()
            .map(|(feature, value)| self.weight(feature) * value)
            .sum()
    }
}

impl<S, A, E: FeatureExtractor<S, A>> QFunction<S, A> for LinearQFunction<E> {
    fn q_value(&self, state: &S, action: &A) -> f64 {
        self.dot(&self.extractor.features(state, action))
    }

    fn observe(&mut self, state: &S, action: &A, target: f64, alpha: f64) {
        let features = self.extractor.features(state, action);
        let correction = target - self.dot(&features);
        for (feature, value) in features {
            *self.weights.entry(feature).or_insert(DEFAULT_WEIGHT) += alpha * correction * value;
        }
    }

    fn on_training_finished(&self) {
        let weights = self
            .weights
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(feature, weight)| format!("{feature}={weight:.4}"))
            .join(", ");
        info!(num_features = self.weights.len(), %weights, "learned weights");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::IdentityExtractor;
    use assert_approx_eq::assert_approx_eq;

    #[derive(Debug)]
    struct FixedFeatures(Features);

    impl FeatureExtractor<&'static str, &'static str> for FixedFeatures {
        fn features(&self, _state: &&'static str, _action: &&'static str) -> Features {
            self.0.clone()
        }
    }

    fn two_features() -> FixedFeatures {
        FixedFeatures(HashMap::from([
            ("bias".to_string(), 1.),
            ("distance".to_string(), 0.5),
        ]))
    }

    #[test]
    fn unseen_weights_default_to_one() {
        let q = LinearQFunction::new(two_features());
        assert_eq!(q.weight("bias"), 1.);
        assert_approx_eq!(q.q_value(&"s", &"a"), 1.5);
        assert!(q.weights().is_empty());
    }

    #[test]
    fn observe_moves_weights_along_features() {
        let mut q = LinearQFunction::new(two_features());
        // correction = 3.5 - 1.5 = 2
        q.observe(&"s", &"a", 3.5, 0.1);
        assert_approx_eq!(q.weight("bias"), 1. + 0.1 * 2. * 1.);
        assert_approx_eq!(q.weight("distance"), 1. + 0.1 * 2. * 0.5);
        assert_approx_eq!(q.q_value(&"s", &"a"), 1.2 + 0.55);
    }

    #[test]
    fn identity_features_behave_like_a_table_offset_by_one() {
        let mut q = LinearQFunction::new(IdentityExtractor::new());
        assert_eq!(q.q_value(&"x", &"right"), 1.);
        q.observe(&"x", &"right", 5., 1.);
        assert_approx_eq!(q.q_value(&"x", &"right"), 5.);
        assert_eq!(q.q_value(&"x", &"left"), 1.);
        assert_eq!(q.weights().len(), 1);
    }
}
