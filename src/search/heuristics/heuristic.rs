use crate::search::SearchProblem;
use ordered_float::OrderedFloat;
use std::fmt::Debug;

pub type HeuristicValue = OrderedFloat<f64>;

pub trait Heuristic<P: SearchProblem>: Debug {
    /// Estimate the remaining cost from `state` to a goal of `problem`. A*
    /// only returns optimal plans when this never overestimates, which is not
    /// checked.
    fn evaluate(&mut self, state: &P::State, problem: &P) -> HeuristicValue;
}

impl<P: SearchProblem, H: Heuristic<P> + ?Sized> Heuristic<P> for Box<H> {
    fn evaluate(&mut self, state: &P::State, problem: &P) -> HeuristicValue {
        (**self).evaluate(state, problem)
    }
}
