//! Uniform cost search

use crate::search::{
    search_engines::{graph_search, SearchEngine, SearchResult},
    PriorityFrontier, SearchProblem, SearchStatistics,
};

#[derive(Debug, Default)]
pub struct UCS {}

impl UCS {
    pub fn new() -> Self {
        Self {}
    }
}

impl<P: SearchProblem> SearchEngine<P> for UCS {
    fn search(&mut self, problem: &P) -> (SearchResult<P::Action>, SearchStatistics) {
        graph_search(problem, PriorityFrontier::new(), |node| node.get_g())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::path_cost;
    use crate::test_utils::*;

    #[test]
    fn finds_cheapest_path() {
        let problem = weighted_graph();
        let (result, _) = UCS::new().search(&problem);
        assert_eq!(result, SearchResult::Success(vec!["StoA", "AtoB", "BtoG"]));
        assert_eq!(
            path_cost(&problem, result.plan().unwrap()),
            Some(WEIGHTED_GRAPH_OPTIMAL_COST)
        );
    }

    #[test]
    fn goal_is_tested_on_pop_not_on_push() {
        // G is pushed first via the expensive edge, but the cheaper route
        // through A is popped before it
        let problem = GraphProblem::new("S", &["G"])
            .edge("S", "G", "direct", 5.)
            .edge("S", "A", "toA", 1.)
            .edge("A", "G", "viaA", 1.);
        let (result, _) = UCS::new().search(&problem);
        assert_eq!(result, SearchResult::Success(vec!["toA", "viaA"]));
    }
}
