//! The graph search loop shared by every engine. The engines differ only in
//! the frontier they hand in and the priority they give each node.

use crate::search::{
    search_engines::SearchResult, Frontier, HeuristicValue, SearchNode, SearchProblem,
    SearchStatistics,
};
use std::collections::HashSet;
use tracing::debug;

/// Run graph search with visit-on-pop semantics: a node is checked against
/// the explored set and the goal test when it leaves the frontier, not when
/// it enters. A state can therefore sit in the frontier more than once; only
/// its first pop is expanded.
pub fn graph_search<P, F, R>(
    problem: &P,
    mut frontier: F,
    mut priority: R,
) -> (SearchResult<P::Action>, SearchStatistics)
where
    P: SearchProblem,
    F: Frontier<SearchNode<P::State, P::Action>>,
    R: FnMut(&SearchNode<P::State, P::Action>) -> HeuristicValue,
{
    let mut statistics = SearchStatistics::new();
    let mut explored: HashSet<P::State> = HashSet::new();

    let root_node = SearchNode::root(problem.starting_state());
    let root_priority = priority(&root_node);
    frontier.push(root_node, root_priority);
    statistics.increment_generated_nodes(1);

    while let Some(node) = frontier.pop() {
        if explored.contains(node.get_state()) {
            statistics.increment_duplicate_pops();
            continue;
        }

        if problem.is_goal(node.get_state()) {
            debug!(
                plan_length = node.depth(),
                plan_cost = node.get_g().into_inner(),
                "goal reached"
            );
            statistics.finalise_search();
            return (SearchResult::Success(node.into_actions()), statistics);
        }

        explored.insert(node.get_state().clone());
        statistics.increment_expanded_nodes();

        let mut generated = 0;
        for successor in problem.successor_states(node.get_state()) {
            if explored.contains(&successor.state) {
                continue;
            }
            let child_node = node.child(successor.state, successor.action, successor.cost);
            let child_priority = priority(&child_node);
            frontier.push(child_node, child_priority);
            generated += 1;
        }
        statistics.increment_generated_nodes(generated);
        statistics.register_frontier_size(frontier.len());
    }

    debug!("frontier exhausted");
    statistics.finalise_search();
    (SearchResult::Unsolvable, statistics)
}
