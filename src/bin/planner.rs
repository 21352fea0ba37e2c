use clap::Parser;
use gridagents::{
    search::{path_cost, SearchEngineName, SearchResult},
    verbosity::{init_tracing, Verbosity},
    worlds::{ManhattanHeuristic, Maze},
};
use itertools::Itertools;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

#[derive(Parser)]
#[command(version)]
/// Find a route from `P` to `.` through a maze.
struct Cli {
    #[arg(help = "The maze layout file", id = "MAZE")]
    maze: PathBuf,
    #[arg(
        value_enum,
        help = "The search engine to use",
        short = 'e',
        long = "engine",
        id = "ENGINE",
        default_value_t = SearchEngineName::AStar
    )]
    search_engine_name: SearchEngineName,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity, cli.colour);

    let maze = match Maze::from_path(&cli.maze) {
        Ok(maze) => maze,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(width = maze.width(), height = maze.height(), "loaded maze");

    let (result, _) = cli
        .search_engine_name
        .search(&maze, Box::new(ManhattanHeuristic::new()));

    match result {
        SearchResult::Success(plan) => {
            let cost = path_cost(&maze, &plan).unwrap_or(f64::INFINITY);
            info!(plan_length = plan.len(), cost, "plan found");

            println!("Plan found:");
            println!("{}", plan.iter().join(" "));
            println!("Plan length: {}", plan.len());
            println!("Plan cost: {}", cost);
            ExitCode::SUCCESS
        }
        SearchResult::Unsolvable => {
            info!("no plan found");
            println!("No plan found");
            ExitCode::FAILURE
        }
    }
}
