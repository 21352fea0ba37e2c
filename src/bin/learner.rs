use clap::Parser;
use gridagents::{
    config::{LearnerConfig, LearnerKind},
    learning::{
        ApproximateQAgent, IdentityExtractor, MarkovDecisionProcess, QFunction, QLearningAgent,
        TabularQAgent, ValueIterationAgent,
    },
    verbosity::{init_tracing, Verbosity},
    worlds::{GridAction, GridState, GridWorld, GridWorldEnvironment},
    Result,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

#[derive(Parser)]
#[command(version)]
/// Learn a policy for a grid world.
struct Cli {
    #[arg(help = "The learner config file", id = "CONFIG")]
    config: PathBuf,
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

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = LearnerConfig::load(&cli.config)?;
    let world = GridWorld::from_config(&config.world)?;
    info!(
        agent = ?config.agent,
        width = world.width(),
        height = world.height(),
        noise = world.noise(),
        "loaded grid world"
    );

    match config.agent {
        LearnerKind::ValueIteration => {
            let agent = ValueIterationAgent::new(world.clone(), config.value_iteration)?;
            info!(sweeps = agent.residuals().len(), "value iteration finished");
            print_results(
                &world,
                |state| agent.get_value(state),
                |state| agent.get_policy(state),
            );
        }
        LearnerKind::QLearning => {
            let actions = world.clone();
            let agent = TabularQAgent::tabular(
                move |state: &GridState| actions.possible_actions(state),
                config.reinforcement,
            )?;
            learn(&world, agent, &config);
        }
        LearnerKind::ApproximateQLearning => {
            let actions = world.clone();
            let agent = ApproximateQAgent::approximate(
                move |state: &GridState| actions.possible_actions(state),
                IdentityExtractor::new(),
                config.reinforcement,
            )?;
            learn(&world, agent, &config);
        }
    }
    Ok(())
}

/// Run the configured number of episodes against a sampled copy of `world`,
/// then print what the agent learned.
fn learn<Q, R>(
    world: &GridWorld,
    mut agent: QLearningAgent<GridState, GridAction, Q, R>,
    config: &LearnerConfig,
) where
    Q: QFunction<GridState, GridAction>,
    R: Rng,
{
    let rng = match config.reinforcement.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let mut environment = GridWorldEnvironment::new(world.clone(), rng);

    for episode in 1..=config.episodes {
        let episode_return = environment.run_episode(&mut agent, config.max_steps);
        info!(episode, episode_return, "episode finished");
    }
    info!(
        train_rewards = agent.accumulated_train_rewards(),
        test_rewards = agent.accumulated_test_rewards(),
        "learning finished"
    );

    print_results(
        world,
        |state| agent.get_value(state),
        |state| agent.get_policy(state),
    );
}

fn print_results<V, P>(world: &GridWorld, value: V, policy: P)
where
    V: Fn(&GridState) -> f64,
    P: Fn(&GridState) -> Option<GridAction>,
{
    println!("Values:");
    println!("{}", world.render_values(value));
    println!();
    println!("Policy:");
    println!("{}", world.render_policy(policy));
}
