use crate::game_tree::GameState;
use crate::learning::MarkovDecisionProcess;
use crate::search::{Heuristic, HeuristicValue, SearchProblem, Successor};
use rand::{seq::SliceRandom, Rng};
use std::collections::HashMap;

pub const OPEN_MAZE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/layouts/open.maze"
));

pub const WINDING_MAZE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/layouts/winding.maze"
));

pub const TWO_ROUTE_MAZE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/layouts/two_route.maze"
));

/// Length of the short route of [`TWO_ROUTE_MAZE`]; the long one takes 8.
pub const TWO_ROUTE_MAZE_SHORTEST: usize = 4;

pub const DISCOUNT_GRID_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/layouts/discount.grid");

/// An explicit directed graph. Successors are listed in the order their
/// edges were added.
#[derive(Debug, Clone)]
pub struct GraphProblem {
    start: &'static str,
    goals: Vec<&'static str>,
    edges: Vec<(&'static str, Successor<&'static str, &'static str>)>,
}

impl GraphProblem {
    pub fn new(start: &'static str, goals: &[&'static str]) -> Self {
        Self {
            start,
            goals: goals.to_vec(),
            edges: vec![],
        }
    }

    pub fn edge(
        mut self,
        from: &'static str,
        to: &'static str,
        action: &'static str,
        cost: f64,
    ) -> Self {
        self.edges.push((from, Successor::new(to, action, cost)));
        self
    }
}

impl SearchProblem for GraphProblem {
    type State = &'static str;
    type Action = &'static str;

    fn starting_state(&self) -> &'static str {
        self.start
    }

    fn is_goal(&self, state: &&'static str) -> bool {
        self.goals.contains(state)
    }

    fn successor_states(&self, state: &&'static str) -> Vec<Successor<&'static str, &'static str>> {
        self.edges
            .iter()
            .filter(|(from, _)| from == state)
            .map(|(_, successor)| successor.clone())
            .collect()
    }
}

/// A -> B -> C with goal C.
pub fn line_graph() -> GraphProblem {
    GraphProblem::new("A", &["C"])
        .edge("A", "B", "toB", 1.)
        .edge("B", "C", "toC", 1.)
}

/// The single edge S -> G is the shortest route but S -> A -> B -> G is the
/// cheapest.
pub fn weighted_graph() -> GraphProblem {
    GraphProblem::new("S", &["G"])
        .edge("S", "A", "StoA", 1.)
        .edge("S", "G", "StoG", 10.)
        .edge("S", "C", "StoC", 2.)
        .edge("A", "B", "AtoB", 1.)
        .edge("B", "G", "BtoG", 1.)
        .edge("C", "G", "CtoG", 2.)
}

pub const WEIGHTED_GRAPH_OPTIMAL_COST: f64 = 3.;

#[derive(Debug, Clone)]
pub struct TableHeuristic(HashMap<&'static str, f64>);

impl Heuristic<GraphProblem> for TableHeuristic {
    fn evaluate(&mut self, state: &&'static str, _problem: &GraphProblem) -> HeuristicValue {
        self.0.get(state).copied().unwrap_or(0.).into()
    }
}

/// Exact remaining cost in [`weighted_graph`].
pub fn weighted_graph_heuristic() -> TableHeuristic {
    TableHeuristic(HashMap::from([
        ("S", 3.),
        ("A", 2.),
        ("B", 1.),
        ("C", 2.),
        ("G", 0.),
    ]))
}

/// Action that [`TreeGame::with_stop`] treats as the stop action. It sorts
/// after every other label so it would win any tie it took part in.
pub const STOP: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Leaf(f64),
    Branch {
        /// Score of the node if it is cut off before its children are seen.
        estimate: f64,
        children: Vec<(u32, Tree)>,
    },
}

pub fn leaf(value: f64) -> Tree {
    Tree::Leaf(value)
}

pub fn branch(children: Vec<(u32, Tree)>) -> Tree {
    branch_with_estimate(children, 0.)
}

pub fn branch_with_estimate(children: Vec<(u32, Tree)>, estimate: f64) -> Tree {
    Tree::Branch { estimate, children }
}

/// A game given as an explicit tree. The levels of the tree are the agents'
/// turns in order; leaves are finished games.
#[derive(Debug, Clone)]
pub struct TreeGame {
    num_agents: usize,
    tree: Tree,
    stop: bool,
}

impl TreeGame {
    pub fn new(num_agents: usize, tree: Tree) -> Self {
        Self {
            num_agents,
            tree,
            stop: false,
        }
    }

    pub fn with_stop(self) -> Self {
        Self { stop: true, ..self }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl GameState for TreeGame {
    type Action = u32;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent_index: usize) -> Vec<u32> {
        match &self.tree {
            Tree::Leaf(_) => vec![],
            Tree::Branch { children, .. } => children.iter().map(|(label, _)| *label).collect(),
        }
    }

    fn generate_successor(&self, _agent_index: usize, action: &u32) -> Self {
        let Tree::Branch { children, .. } = &self.tree else {
            panic!("no successors of a leaf");
        };
        let (_, child) = children
            .iter()
            .find(|(label, _)| label == action)
            .expect("action is not legal");
        Self {
            tree: child.clone(),
            ..self.clone()
        }
    }

    fn is_over(&self) -> bool {
        matches!(self.tree, Tree::Leaf(_))
    }

    fn is_stop(&self, action: &u32) -> bool {
        self.stop && *action == STOP
    }
}

/// Leaf value, or the estimate of a cut-off branch.
pub fn leaf_value(game: &TreeGame) -> f64 {
    match game.tree {
        Tree::Leaf(value) => value,
        Tree::Branch { estimate, .. } => estimate,
    }
}

/// The two-ply example from the textbook: a max root over three min nodes
/// with leaves [3, 12, 8], [2, 4, 6] and [14, 5, 2]. Minimax value 3 via
/// action 0.
pub fn textbook_tree() -> TreeGame {
    let min_node = |values: [f64; 3]| {
        branch(
            values
                .into_iter()
                .zip(0..)
                .map(|(value, label)| (label, leaf(value)))
                .collect(),
        )
    };
    TreeGame::new(
        2,
        branch(vec![
            (0, min_node([3., 12., 8.])),
            (1, min_node([2., 4., 6.])),
            (2, min_node([14., 5., 2.])),
        ]),
    )
}

/// A random game running `rounds` full rounds of `num_agents` agents. Leaf
/// values are small integers so ties are common, some games end early, some
/// interior nodes have no moves, and labels are listed out of order. The root
/// always has at least one action.
pub fn random_tree_game(rng: &mut impl Rng, num_agents: usize, rounds: usize) -> TreeGame {
    TreeGame::new(num_agents, random_tree(rng, num_agents * rounds, true))
}

fn small_value(rng: &mut impl Rng) -> f64 {
    f64::from(rng.random_range(0..5u8))
}

fn random_tree(rng: &mut impl Rng, plies_left: usize, is_root: bool) -> Tree {
    if plies_left == 0 || (!is_root && rng.random_bool(0.15)) {
        return leaf(small_value(rng));
    }
    let min_children = if is_root { 1 } else { 0 };
    let num_children = rng.random_range(min_children..=3u32);
    let mut labels: Vec<u32> = (0..num_children).collect();
    labels.shuffle(rng);
    let estimate = small_value(rng);
    let children = labels
        .into_iter()
        .map(|label| (label, random_tree(rng, plies_left - 1, false)))
        .collect();
    branch_with_estimate(children, estimate)
}

/// Every agent may always play 0 or 1, forever.
#[derive(Debug, Clone)]
pub struct CountingGame {
    num_agents: usize,
    moves: Vec<u8>,
}

impl CountingGame {
    pub fn new(num_agents: usize) -> Self {
        Self {
            num_agents,
            moves: vec![],
        }
    }

    pub fn moves_made(&self) -> f64 {
        self.moves.len() as f64
    }

    /// An irregular score: positive for moves made by agent 0's side on even
    /// plies, negative on odd ones, weighted by position.
    pub fn parity_score(&self) -> f64 {
        self.moves
            .iter()
            .enumerate()
            .map(|(ply, action)| {
                let weight = ((ply * 7 + 3) % 5) as f64 * f64::from(*action);
                if ply % 2 == 0 {
                    weight
                } else {
                    -weight
                }
            })
            .sum()
    }
}

impl GameState for CountingGame {
    type Action = u8;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent_index: usize) -> Vec<u8> {
        vec![0, 1]
    }

    fn generate_successor(&self, _agent_index: usize, action: &u8) -> Self {
        let mut moves = self.moves.clone();
        moves.push(*action);
        Self {
            num_agents: self.num_agents,
            moves,
        }
    }

    fn is_over(&self) -> bool {
        false
    }
}

/// S0 --go, reward 10--> S1, where S1 is terminal.
#[derive(Debug, Clone, Copy)]
pub struct TwoStateMdp;

impl MarkovDecisionProcess for TwoStateMdp {
    type State = &'static str;
    type Action = &'static str;

    fn states(&self) -> Vec<&'static str> {
        vec!["S0", "S1"]
    }

    fn is_terminal(&self, state: &&'static str) -> bool {
        *state == "S1"
    }

    fn possible_actions(&self, state: &&'static str) -> Vec<&'static str> {
        match *state {
            "S0" => vec!["go"],
            _ => vec![],
        }
    }

    fn transition_states_and_probs(
        &self,
        state: &&'static str,
        action: &&'static str,
    ) -> Vec<(&'static str, f64)> {
        match (*state, *action) {
            ("S0", "go") => vec![("S1", 1.)],
            _ => vec![],
        }
    }

    fn reward(&self, state: &&'static str, action: &&'static str, next_state: &&'static str) -> f64 {
        match (*state, *action, *next_state) {
            ("S0", "go", "S1") => 10.,
            _ => 0.,
        }
    }
}

/// 0 --step--> 1 --step, reward 10--> 2, where 2 is terminal.
#[derive(Debug, Clone, Copy)]
pub struct ChainMdp;

impl MarkovDecisionProcess for ChainMdp {
    type State = u8;
    type Action = &'static str;

    fn states(&self) -> Vec<u8> {
        vec![0, 1, 2]
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state == 2
    }

    fn possible_actions(&self, state: &u8) -> Vec<&'static str> {
        if *state < 2 {
            vec!["step"]
        } else {
            vec![]
        }
    }

    fn transition_states_and_probs(&self, state: &u8, _action: &&'static str) -> Vec<(u8, f64)> {
        if *state < 2 {
            vec![(state + 1, 1.)]
        } else {
            vec![]
        }
    }

    fn reward(&self, state: &u8, _action: &&'static str, _next_state: &u8) -> f64 {
        if *state == 1 {
            10.
        } else {
            0.
        }
    }
}

/// Legal actions for a tiny corridor: "x" and "y" can go either way, any
/// other state is terminal.
pub fn line_actions(state: &&'static str) -> Vec<&'static str> {
    match *state {
        "x" | "y" => vec!["left", "right"],
        _ => vec![],
    }
}

/// A fixed stream of corridor transitions as (state, action, next, reward).
pub fn chain_transitions() -> Vec<(&'static str, &'static str, &'static str, f64)> {
    vec![
        ("x", "right", "y", 0.),
        ("y", "right", "terminal", 10.),
        ("y", "left", "x", -1.),
        ("x", "left", "terminal", 1.),
        ("x", "right", "y", -0.5),
    ]
}
