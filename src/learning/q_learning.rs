use crate::config::ReinforcementConfig;
use crate::error::Result;
use crate::learning::{FeatureExtractor, LinearQFunction, QFunction, QTable};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use std::{
    fmt::{self, Debug},
    hash::Hash,
};
use tracing::{debug, info};

type LegalActions<S, A> = Box<dyn Fn(&S) -> Vec<A>>;

/// Tabular Q-learning.
pub type TabularQAgent<S, A> = QLearningAgent<S, A, QTable<S, A>>;

/// Q-learning over a weighted sum of features.
pub type ApproximateQAgent<S, A, E> = QLearningAgent<S, A, LinearQFunction<E>>;

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// An online, model-free learner. The agent never sees the environment's
/// model; an outside loop shows it one transition at a time through
/// [`QLearningAgent::observe_transition`] (or [`QLearningAgent::update`])
/// and asks it for actions with [`QLearningAgent::get_action`].
///
/// After `num_training` episodes have been stopped, learning and
/// exploration are switched off and the agent plays greedily.
pub struct QLearningAgent<S, A, Q, R = StdRng> {
    q_function: Q,
    legal_actions: LegalActions<S, A>,
    alpha: f64,
    epsilon: f64,
    discount_rate: f64,
    num_training: usize,
    rng: R,
    episodes_so_far: usize,
    episode_rewards: f64,
    accumulated_train_rewards: f64,
    accumulated_test_rewards: f64,
}

impl<S, A> TabularQAgent<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    pub fn tabular(
        legal_actions: impl Fn(&S) -> Vec<A> + 'static,
        config: ReinforcementConfig,
    ) -> Result<Self> {
        Self::new(legal_actions, QTable::new(), config)
    }
}

impl<S, A, E> ApproximateQAgent<S, A, E>
where
    E: FeatureExtractor<S, A>,
{
    pub fn approximate(
        legal_actions: impl Fn(&S) -> Vec<A> + 'static,
        extractor: E,
        config: ReinforcementConfig,
    ) -> Result<Self> {
        Self::new(legal_actions, LinearQFunction::new(extractor), config)
    }
}

impl<S, A, Q: QFunction<S, A>> QLearningAgent<S, A, Q> {
    /// Build an agent that asks `legal_actions` which actions a state offers.
    /// The exploration RNG is seeded from `config.seed` when present.
    pub fn new(
        legal_actions: impl Fn(&S) -> Vec<A> + 'static,
        q_function: Q,
        config: ReinforcementConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_function,
            legal_actions: Box::new(legal_actions),
            alpha: config.alpha,
            epsilon: config.epsilon,
            discount_rate: config.discount_rate,
            num_training: config.num_training,
            rng: build_rng(config.seed),
            episodes_so_far: 0,
            episode_rewards: 0.,
            accumulated_train_rewards: 0.,
            accumulated_test_rewards: 0.,
        })
    }
}

impl<S, A: Clone, Q: QFunction<S, A>, R: Rng> QLearningAgent<S, A, Q, R> {
    /// Swap the exploration RNG.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> QLearningAgent<S, A, Q, R2> {
        QLearningAgent {
            q_function: self.q_function,
            legal_actions: self.legal_actions,
            alpha: self.alpha,
            epsilon: self.epsilon,
            discount_rate: self.discount_rate,
            num_training: self.num_training,
            rng,
            episodes_so_far: self.episodes_so_far,
            episode_rewards: self.episode_rewards,
            accumulated_train_rewards: self.accumulated_train_rewards,
            accumulated_test_rewards: self.accumulated_test_rewards,
        }
    }

    pub fn get_legal_actions(&self, state: &S) -> Vec<A> {
        (self.legal_actions)(state)
    }

    pub fn get_q_value(&self, state: &S, action: &A) -> f64 {
        self.q_function.q_value(state, action)
    }

    /// First legal action of maximal Q-value, with that value.
    fn best_action_and_value(&self, state: &S) -> Option<(A, f64)> {
        let mut best: Option<(A, f64)> = None;
        for action in self.get_legal_actions(state) {
            let q_value = self.get_q_value(state, &action);
            if best.as_ref().map_or(true, |(_, value)| q_value > *value) {
                best = Some((action, q_value));
            }
        }
        best
    }

    /// `max_a Q(state, a)`, or 0.0 when `state` offers no actions.
    pub fn get_value(&self, state: &S) -> f64 {
        self.best_action_and_value(state)
            .map_or(0., |(_, value)| value)
    }

    /// The greedy action. Ties go to the first legal action listed.
    pub fn get_policy(&self, state: &S) -> Option<A> {
        self.best_action_and_value(state).map(|(action, _)| action)
    }

    /// Epsilon greedy: a uniformly random legal action with probability
    /// epsilon, the greedy one otherwise. `None` when there are no legal
    /// actions.
    pub fn get_action(&mut self, state: &S) -> Option<A> {
        let actions = self.get_legal_actions(state);
        if actions.is_empty() {
            return None;
        }
        if self.rng.random::<f64>() < self.epsilon {
            actions.choose(&mut self.rng).cloned()
        } else {
            self.get_policy(state)
        }
    }

    /// Learn from a single transition:
    /// `Q(s, a) ← (1 - α) Q(s, a) + α (r + γ max_a' Q(s', a'))`.
    pub fn update(&mut self, state: &S, action: &A, next_state: &S, reward: f64) {
        let target = reward + self.discount_rate * self.get_value(next_state);
        self.q_function.observe(state, action, target, self.alpha);
    }

    pub fn start_episode(&mut self) {
        self.episode_rewards = 0.;
    }

    /// Record the reward of a transition in the current episode and learn
    /// from it.
    pub fn observe_transition(&mut self, state: &S, action: &A, next_state: &S, reward: f64) {
        self.episode_rewards += reward;
        self.update(state, action, next_state, reward);
    }

    pub fn stop_episode(&mut self) {
        if self.is_in_training() {
            self.accumulated_train_rewards += self.episode_rewards;
        } else {
            self.accumulated_test_rewards += self.episode_rewards;
        }
        self.episodes_so_far += 1;
        debug!(
            episode = self.episodes_so_far,
            reward = self.episode_rewards,
            "episode finished"
        );

        if self.episodes_so_far >= self.num_training {
            // training is over, play greedily without learning
            self.epsilon = 0.;
            self.alpha = 0.;
        }
        if self.episodes_so_far == self.num_training {
            info!(
                episodes = self.num_training,
                average_reward = self.accumulated_train_rewards / self.num_training as f64,
                "training finished"
            );
            self.q_function.on_training_finished();
        }
    }

    pub fn is_in_training(&self) -> bool {
        self.episodes_so_far < self.num_training
    }

    pub fn is_in_testing(&self) -> bool {
        !self.is_in_training()
    }

    pub fn episodes_so_far(&self) -> usize {
        self.episodes_so_far
    }

    pub fn accumulated_train_rewards(&self) -> f64 {
        self.accumulated_train_rewards
    }

    pub fn accumulated_test_rewards(&self) -> f64 {
        self.accumulated_test_rewards
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn q_function(&self) -> &Q {
        &self.q_function
    }
}

impl<S, A, Q: Debug, R> Debug for QLearningAgent<S, A, Q, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QLearningAgent")
            .field("q_function", &self.q_function)
            .field("alpha", &self.alpha)
            .field("epsilon", &self.epsilon)
            .field("discount_rate", &self.discount_rate)
            .field("num_training", &self.num_training)
            .field("episodes_so_far", &self.episodes_so_far)
            .finish_non_exhaustive()
    }
}
