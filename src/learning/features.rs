use std::{collections::HashMap, fmt::Debug};

/// Named feature values of a (state, action) pair. Features absent from the
/// map are zero.
pub type Features = HashMap<String, f64>;

pub trait FeatureExtractor<S, A>: Debug {
    fn features(&self, state: &S, action: &A) -> Features;
}

/// A single indicator feature per (state, action) pair. A linear Q-function
/// over these features is a Q-table in disguise.
#[derive(Debug, Clone, Default)]
pub struct IdentityExtractor {}

impl IdentityExtractor {
    pub fn new() -> Self {
        IdentityExtractor {}
    }
}

impl<S: Debug, A: Debug> FeatureExtractor<S, A> for IdentityExtractor {
    fn features(&self, state: &S, action: &A) -> Features {
        HashMap::from([(format!("{state:?}|{action:?}"), 1.)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_features_are_distinct_indicators() {
        let extractor = IdentityExtractor::new();
        let a = extractor.features(&(0, 1), &"north");
        let b = extractor.features(&(0, 1), &"south");
        assert_eq!(a.len(), 1);
        assert_eq!(a.values().copied().collect::<Vec<_>>(), vec![1.]);
        assert!(a.keys().all(|key| !b.contains_key(key)));
    }
}
