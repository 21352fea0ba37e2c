use crate::error::{Error, Result};
use crate::search::{Heuristic, HeuristicValue, SearchProblem, Successor};
use crate::worlds::Direction;
use std::path::Path;

/// A cell, as `(column, row)` counted from the top left corner.
pub type Position = (usize, usize);

/// A rectangular maze read from text. `%` is a wall, `P` the starting cell,
/// `.` the goal cell, and anything else is open floor. Rows may be of
/// different lengths; cells beyond the end of a row are walls.
///
/// Every move costs one.
#[derive(Debug, Clone)]
pub struct Maze {
    walls: Vec<Vec<bool>>,
    start: Position,
    goal: Position,
}

impl Maze {
    pub fn from_text(text: &str) -> Result<Self> {
        let mut walls = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (y, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() && walls.is_empty() {
                // tolerate a leading blank line from raw string literals
                continue;
            }
            let row_index = walls.len();
            let mut row = Vec::with_capacity(line.len());
            for (x, c) in line.chars().enumerate() {
                match c {
                    '%' => row.push(true),
                    'P' => {
                        if start.replace((x, row_index)).is_some() {
                            return Err(Error::MazeParse {
                                line: y + 1,
                                message: "more than one starting cell".to_string(),
                            });
                        }
                        row.push(false);
                    }
                    '.' => {
                        if goal.replace((x, row_index)).is_some() {
                            return Err(Error::MazeParse {
                                line: y + 1,
                                message: "more than one goal cell".to_string(),
                            });
                        }
                        row.push(false);
                    }
                    ' ' => row.push(false),
                    other => {
                        return Err(Error::MazeParse {
                            line: y + 1,
                            message: format!("unexpected character {other:?}"),
                        })
                    }
                }
            }
            walls.push(row);
        }

        let last_line = walls.len();
        let start = start.ok_or_else(|| Error::MazeParse {
            line: last_line,
            message: "no starting cell".to_string(),
        })?;
        let goal = goal.ok_or_else(|| Error::MazeParse {
            line: last_line,
            message: "no goal cell".to_string(),
        })?;

        Ok(Self { walls, start, goal })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn is_wall(&self, (x, y): Position) -> bool {
        self.walls
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(true)
    }

    pub fn height(&self) -> usize {
        self.walls.len()
    }

    pub fn width(&self) -> usize {
        self.walls.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl SearchProblem for Maze {
    type State = Position;
    type Action = Direction;

    fn starting_state(&self) -> Position {
        self.start
    }

    fn is_goal(&self, state: &Position) -> bool {
        *state == self.goal
    }

    fn successor_states(&self, state: &Position) -> Vec<Successor<Position, Direction>> {
        Direction::ALL
            .iter()
            .filter_map(|direction| {
                direction
                    .apply(*state)
                    .filter(|next| !self.is_wall(*next))
                    .map(|next| Successor::new(next, *direction, 1.))
            })
            .collect()
    }
}

/// Manhattan distance to the goal cell. Admissible and consistent for a maze
/// of unit cost moves.
#[derive(Debug, Clone, Default)]
pub struct ManhattanHeuristic {}

impl ManhattanHeuristic {
    pub fn new() -> Self {
        ManhattanHeuristic {}
    }
}

impl Heuristic<Maze> for ManhattanHeuristic {
    fn evaluate(&mut self, state: &Position, problem: &Maze) -> HeuristicValue {
        let (x, y) = *state;
        let (gx, gy) = problem.goal();
        ((x.abs_diff(gx) + y.abs_diff(gy)) as f64).into()
    }
}
