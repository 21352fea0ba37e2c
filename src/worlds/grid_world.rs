use crate::config::GridWorldConfig;
use crate::error::{Error, Result};
use crate::learning::{MarkovDecisionProcess, QFunction, QLearningAgent};
use crate::worlds::{Direction, Position};
use itertools::Itertools;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    path::Path,
};
use tracing::trace;

const BOOK_GRID: &str = "
_ _ _ +1
_ # _ -1
S _ _ _
";

const BRIDGE_GRID: &str = "
#  -100 -100 -100 -100 -100  #
1   S    _    _    _    _   10
#  -100 -100 -100 -100 -100  #
";

const CLIFF_GRID: &str = "
_    _    _    _    _
8    S    _    _    10
-100 -100 -100 -100 -100
";

/// The grids shipped with the crate.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinGrid {
    #[default]
    Book,
    Bridge,
    Cliff,
}

impl BuiltinGrid {
    pub fn layout(&self) -> &'static str {
        match self {
            BuiltinGrid::Book => BOOK_GRID,
            BuiltinGrid::Bridge => BRIDGE_GRID,
            BuiltinGrid::Cliff => CLIFF_GRID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GridState {
    At(Position),
    /// Absorbing state entered by taking `Exit` from an exit cell.
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GridAction {
    Move(Direction),
    Exit,
}

impl Display for GridAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridAction::Move(direction) => write!(f, "{direction}"),
            GridAction::Exit => write!(f, "Exit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Wall,
    Open,
    Exit(f64),
}

/// A noisy grid world. Moves succeed with probability `1 - noise` and slip
/// to either perpendicular direction otherwise; a move into a wall or off
/// the grid leaves the agent where it was. Exit cells only offer `Exit`,
/// which pays the cell's value and ends the episode.
#[derive(Debug, Clone)]
pub struct GridWorld {
    cells: Vec<Vec<Cell>>,
    start: Position,
    noise: f64,
    living_reward: f64,
}

impl GridWorld {
    /// Parse a layout of whitespace separated tokens, one row per line: `#`
    /// for a wall, `S` for the start, `_` for open floor and a number for an
    /// exit paying that reward.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();
        let mut start = None;

        for (line_index, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let parse_error = |message: String| Error::GridParse {
                line: line_index + 1,
                message,
            };

            let y = cells.len();
            let mut row = Vec::with_capacity(tokens.len());
            for (x, token) in tokens.into_iter().enumerate() {
                let cell = match token {
                    "#" => Cell::Wall,
                    "_" => Cell::Open,
                    "S" => {
                        if start.replace((x, y)).is_some() {
                            return Err(parse_error("more than one starting cell".to_string()));
                        }
                        Cell::Open
                    }
                    other => match other.parse::<f64>() {
                        Ok(reward) if reward.is_finite() => Cell::Exit(reward),
                        _ => return Err(parse_error(format!("unexpected token {other:?}"))),
                    },
                };
                row.push(cell);
            }

            if let Some(first) = cells.first() {
                if first.len() != row.len() {
                    return Err(parse_error(format!(
                        "row has {} cells, expected {}",
                        row.len(),
                        first.len()
                    )));
                }
            }
            cells.push(row);
        }

        let start = start.ok_or_else(|| Error::GridParse {
            line: text.lines().count(),
            message: "no starting cell".to_string(),
        })?;

        Ok(Self {
            cells,
            start,
            noise: 0.2,
            living_reward: 0.,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    pub fn builtin(grid: BuiltinGrid) -> Result<Self> {
        Self::from_text(grid.layout())
    }

    /// The 4x3 grid from the textbook.
    pub fn book() -> Result<Self> {
        Self::builtin(BuiltinGrid::Book)
    }

    /// A narrow bridge between a low and a high exit, lined with cliffs.
    pub fn bridge() -> Result<Self> {
        Self::builtin(BuiltinGrid::Bridge)
    }

    /// A short walk to a low exit or a longer one along a cliff edge.
    pub fn cliff() -> Result<Self> {
        Self::builtin(BuiltinGrid::Cliff)
    }

    pub fn from_config(config: &GridWorldConfig) -> Result<Self> {
        let world = match &config.layout {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin(config.grid)?,
        };
        Ok(world
            .with_noise(config.noise)
            .with_living_reward(config.living_reward))
    }

    pub fn with_noise(self, noise: f64) -> Self {
        Self { noise, ..self }
    }

    pub fn with_living_reward(self, living_reward: f64) -> Self {
        Self {
            living_reward,
            ..self
        }
    }

    pub fn start_state(&self) -> GridState {
        GridState::At(self.start)
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn living_reward(&self) -> f64 {
        self.living_reward
    }

    fn cell(&self, (x, y): Position) -> Cell {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::Wall)
    }

    /// Where a step in `direction` from `position` lands.
    fn destination(&self, position: Position, direction: Direction) -> Position {
        match direction.apply(position) {
            Some(next) if self.cell(next) != Cell::Wall => next,
            _ => position,
        }
    }

    /// Draw one row per line with `value` printed in every non-wall cell.
    pub fn render_values<F>(&self, value: F) -> String
    where
        F: Fn(&GridState) -> f64,
    {
        self.render(|position, cell| match cell {
            Cell::Wall => "#".to_string(),
            _ => format!("{:.2}", value(&GridState::At(position))),
        })
    }

    /// Draw the chosen action of every cell: an arrow for moves, `x` for an
    /// exit and `.` where there is no action.
    pub fn render_policy<F>(&self, policy: F) -> String
    where
        F: Fn(&GridState) -> Option<GridAction>,
    {
        self.render(|position, cell| match cell {
            Cell::Wall => "#".to_string(),
            _ => match policy(&GridState::At(position)) {
                Some(GridAction::Move(direction)) => direction.arrow().to_string(),
                Some(GridAction::Exit) => "x".to_string(),
                None => ".".to_string(),
            },
        })
    }

    fn render<F>(&self, mut draw: F) -> String
    where
        F: FnMut(Position, Cell) -> String,
    {
        self.cells
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| format!("{:>8}", draw((x, y), *cell)))
                    .join(" ")
            })
            .join("\n")
    }
}

impl MarkovDecisionProcess for GridWorld {
    type State = GridState;
    type Action = GridAction;

    fn states(&self) -> Vec<GridState> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| **cell != Cell::Wall)
                    .map(move |(x, _)| GridState::At((x, y)))
            })
            .chain(std::iter::once(GridState::Terminal))
            .collect()
    }

    fn is_terminal(&self, state: &GridState) -> bool {
        *state == GridState::Terminal
    }

    fn possible_actions(&self, state: &GridState) -> Vec<GridAction> {
        match state {
            GridState::Terminal => vec![],
            GridState::At(position) => match self.cell(*position) {
                Cell::Wall => vec![],
                Cell::Exit(_) => vec![GridAction::Exit],
                Cell::Open => Direction::ALL.map(GridAction::Move).to_vec(),
            },
        }
    }

    fn transition_states_and_probs(
        &self,
        state: &GridState,
        action: &GridAction,
    ) -> Vec<(GridState, f64)> {
        let GridState::At(position) = *state else {
            return vec![];
        };
        match (self.cell(position), action) {
            (Cell::Exit(_), _) => vec![(GridState::Terminal, 1.)],
            (_, GridAction::Exit) => vec![],
            (_, GridAction::Move(direction)) => {
                let [left, right] = direction.perpendicular();
                let outcomes = [
                    (self.destination(position, *direction), 1. - self.noise),
                    (self.destination(position, left), self.noise / 2.),
                    (self.destination(position, right), self.noise / 2.),
                ];

                // merge outcomes landing on the same cell, keeping first order
                let mut merged: Vec<(GridState, f64)> = Vec::with_capacity(3);
                for (next, probability) in outcomes {
                    if probability <= 0. {
                        continue;
                    }
                    let next = GridState::At(next);
                    match merged.iter_mut().find(|(state, _)| *state == next) {
                        Some((_, total)) => *total += probability,
                        None => merged.push((next, probability)),
                    }
                }
                merged
            }
        }
    }

    fn reward(&self, state: &GridState, _action: &GridAction, _next_state: &GridState) -> f64 {
        match state {
            GridState::Terminal => 0.,
            GridState::At(position) => match self.cell(*position) {
                Cell::Exit(reward) => reward,
                _ => self.living_reward,
            },
        }
    }
}

/// Simulates a [`GridWorld`] for online learners by sampling its transition
/// model.
#[derive(Debug)]
pub struct GridWorldEnvironment<R = StdRng> {
    world: GridWorld,
    state: GridState,
    rng: R,
}

impl<R: Rng> GridWorldEnvironment<R> {
    pub fn new(world: GridWorld, rng: R) -> Self {
        let state = world.start_state();
        Self { world, state, rng }
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn current_state(&self) -> GridState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.world.is_terminal(&self.state)
    }

    pub fn reset(&mut self) {
        self.state = self.world.start_state();
    }

    /// Take `action` from the current state, returning the sampled next state
    /// and the reward. Stepping from the terminal state stays there with no
    /// reward.
    pub fn step(&mut self, action: &GridAction) -> (GridState, f64) {
        let transitions = self
            .world
            .transition_states_and_probs(&self.state, action);
        let Some(&(last, _)) = transitions.last() else {
            return (self.state, 0.);
        };

        let sample: f64 = self.rng.random();
        let mut cumulative = 0.;
        let next = transitions
            .iter()
            .find(|(_, probability)| {
                cumulative += probability;
                sample < cumulative
            })
            .map_or(last, |(state, _)| *state);

        let reward = self.world.reward(&self.state, action, &next);
        trace!(from = ?self.state, %action, to = ?next, reward, "step");
        self.state = next;
        (next, reward)
    }

    /// Play one episode from the start state, feeding every transition to
    /// `agent`. Stops at the terminal state, when the agent has no action, or
    /// after `max_steps`. Returns the total reward.
    pub fn run_episode<Q, R2>(
        &mut self,
        agent: &mut QLearningAgent<GridState, GridAction, Q, R2>,
        max_steps: usize,
    ) -> f64
    where
        Q: QFunction<GridState, GridAction>,
        R2: Rng,
    {
        self.reset();
        agent.start_episode();
        let mut episode_return = 0.;
        for _ in 0..max_steps {
            if self.is_over() {
                break;
            }
            let state = self.state;
            let Some(action) = agent.get_action(&state) else {
                break;
            };
            let (next_state, reward) = self.step(&action);
            agent.observe_transition(&state, &action, &next_state, reward);
            episode_return += reward;
        }
        agent.stop_episode();
        episode_return
    }
}
