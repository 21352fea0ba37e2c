use crate::search::{Heuristic, HeuristicValue, SearchProblem};

/// The null heuristic. A* with it expands nodes exactly like uniform cost
/// search.
#[derive(Clone, Debug, Default)]
pub struct ZeroHeuristic {}

impl ZeroHeuristic {
    pub fn new() -> Self {
        ZeroHeuristic {}
    }
}

impl<P: SearchProblem> Heuristic<P> for ZeroHeuristic {
    fn evaluate(&mut self, _state: &P::State, _problem: &P) -> HeuristicValue {
        (0.).into()
    }
}
