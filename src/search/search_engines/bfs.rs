//! Breadth first search

use crate::search::{
    search_engines::{graph_search, SearchEngine, SearchResult},
    Queue, SearchProblem, SearchStatistics,
};
use ordered_float::OrderedFloat;

#[derive(Debug, Default)]
pub struct BFS {}

impl BFS {
    pub fn new() -> Self {
        Self {}
    }
}

impl<P: SearchProblem> SearchEngine<P> for BFS {
    fn search(&mut self, problem: &P) -> (SearchResult<P::Action>, SearchStatistics) {
        graph_search(problem, Queue::new(), |_| OrderedFloat(0.))
    }
}
