//! Depth first search

use crate::search::{
    search_engines::{graph_search, SearchEngine, SearchResult},
    SearchProblem, SearchStatistics, Stack,
};
use ordered_float::OrderedFloat;

#[derive(Debug, Default)]
pub struct DFS {}

impl DFS {
    pub fn new() -> Self {
        Self {}
    }
}

impl<P: SearchProblem> SearchEngine<P> for DFS {
    fn search(&mut self, problem: &P) -> (SearchResult<P::Action>, SearchStatistics) {
        graph_search(problem, Stack::new(), |_| OrderedFloat(0.))
    }
}
