//! Graph search over an abstract [`SearchProblem`]. Depth first, breadth
//! first, uniform cost and A* all run the same loop in
//! [`search_engines::graph_search`] and differ only in their frontier.

mod frontier;
pub mod heuristics;
mod search_node;
mod search_problem;
pub mod search_engines;
mod search_statistics;

pub use frontier::{Frontier, PriorityFrontier, Queue, Stack};
pub use heuristics::{Heuristic, HeuristicValue, ZeroHeuristic};
pub use search_engines::{
    AStar, SearchEngine, SearchEngineName, SearchResult, BFS, DFS, UCS,
};
pub use search_node::SearchNode;
pub use search_problem::{path_cost, reaches_goal, SearchProblem, Successor};
pub use search_statistics::SearchStatistics;

/// Search the deepest nodes first.
pub fn depth_first_search<P: SearchProblem>(problem: &P) -> SearchResult<P::Action> {
    DFS::new().search(problem).0
}

/// Search the shallowest nodes first.
pub fn breadth_first_search<P: SearchProblem>(problem: &P) -> SearchResult<P::Action> {
    BFS::new().search(problem).0
}

/// Search the node of least total cost first.
pub fn uniform_cost_search<P: SearchProblem>(problem: &P) -> SearchResult<P::Action> {
    UCS::new().search(problem).0
}

/// Search the node with the lowest combined cost and heuristic first.
pub fn a_star_search<P: SearchProblem, H: Heuristic<P>>(
    problem: &P,
    heuristic: H,
) -> SearchResult<P::Action> {
    AStar::new(heuristic).search(problem).0
}
