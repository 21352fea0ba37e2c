//! A* search

use crate::search::{
    search_engines::{graph_search, SearchEngine, SearchResult},
    Heuristic, PriorityFrontier, SearchProblem, SearchStatistics,
};

/// A* search, ordering the frontier by path cost plus the heuristic estimate
/// of the remaining cost.
#[derive(Debug)]
pub struct AStar<H> {
    heuristic: H,
}

impl<H> AStar<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<P: SearchProblem, H: Heuristic<P>> SearchEngine<P> for AStar<H> {
    fn search(&mut self, problem: &P) -> (SearchResult<P::Action>, SearchStatistics) {
        let heuristic = &mut self.heuristic;
        graph_search(problem, PriorityFrontier::new(), |node| {
            node.get_g() + heuristic.evaluate(node.get_state(), problem)
        })
    }
}
