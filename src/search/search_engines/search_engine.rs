use crate::search::{
    search_engines::{AStar, BFS, DFS, UCS},
    Heuristic, SearchProblem, SearchStatistics,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<A> {
    /// The search was successful, holding the actions from the start to the
    /// goal
    Success(Vec<A>),
    /// The frontier ran empty without reaching a goal
    Unsolvable,
}

impl<A> SearchResult<A> {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchResult::Success(_))
    }

    pub fn plan(&self) -> Option<&[A]> {
        match self {
            SearchResult::Success(plan) => Some(plan),
            SearchResult::Unsolvable => None,
        }
    }

    pub fn into_plan(self) -> Option<Vec<A>> {
        match self {
            SearchResult::Success(plan) => Some(plan),
            SearchResult::Unsolvable => None,
        }
    }
}

pub trait SearchEngine<P: SearchProblem> {
    fn search(&mut self, problem: &P) -> (SearchResult<P::Action>, SearchStatistics);
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[clap(rename_all = "kebab-case")]
pub enum SearchEngineName {
    #[clap(name = "dfs", help = "Depth first search, last pushed node first.")]
    #[serde(rename = "dfs")]
    DFS,
    #[clap(name = "bfs", help = "Breadth first search, first pushed node first.")]
    #[serde(rename = "bfs")]
    BFS,
    #[clap(name = "ucs", help = "Uniform cost search, cheapest path so far first.")]
    #[serde(rename = "ucs")]
    UCS,
    #[clap(
        name = "astar",
        help = "A* search, lowest path cost plus heuristic estimate first."
    )]
    #[serde(rename = "astar")]
    AStar,
}

impl SearchEngineName {
    /// Build the engine. The heuristic is only consulted by A*.
    pub fn create<'a, P: SearchProblem + 'a>(
        &self,
        heuristic: Box<dyn Heuristic<P> + 'a>,
    ) -> Box<dyn SearchEngine<P> + 'a> {
        match self {
            SearchEngineName::DFS => Box::new(DFS::new()),
            SearchEngineName::BFS => Box::new(BFS::new()),
            SearchEngineName::UCS => Box::new(UCS::new()),
            SearchEngineName::AStar => Box::new(AStar::new(heuristic)),
        }
    }

    pub fn search<'a, P: SearchProblem + 'a>(
        &self,
        problem: &P,
        heuristic: Box<dyn Heuristic<P> + 'a>,
    ) -> (SearchResult<P::Action>, SearchStatistics) {
        self.create(heuristic).search(problem)
    }
}
