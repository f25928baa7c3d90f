use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use go_left_rl::{
    common::{
        eval::{evaluate_policy, EvalConfig},
        logger::{CsvLogger, LogItem, Logger},
        policy::{FixedActionPolicy, Policy, RandomPolicy},
        spaces::seed_spaces_rng,
    },
    env::{
        base::{Env, RenderMode},
        go_left::{GoLeftAction, GoLeftConfig},
        wrappers::TimeLimitWrapper,
    },
};

extern crate go_left_rl;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Left,
    Random,
}

/// Walk through the go-left environment: inspect its spaces, play one
/// hard-coded episode, then evaluate a policy and log the episodes.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = 10)]
    grid_size: i64,

    #[arg(long, default_value_t = 10)]
    episodes: usize,

    /// Time limit applied during evaluation
    #[arg(long, default_value_t = 100)]
    max_steps: usize,

    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    policy: PolicyKind,

    /// Render every step of the evaluation episodes
    #[arg(long)]
    render: bool,

    #[arg(long, default_value = "logs/go_left/go_left.csv")]
    log_path: PathBuf,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Some(seed) = args.seed {
        seed_spaces_rng(seed);
    }

    let env_config = GoLeftConfig::new()
        .with_grid_size(args.grid_size)
        .with_render_mode(Some(RenderMode::Console));
    let mut env = env_config.init();

    println!("Observation space: {:?}", env.observation_space().shape());
    println!("Action space: {:?}", env.action_space().shape());
    println!("Sampled action: {}", env.action_space().sample());

    // hard-coded policy: always go left
    let left = usize::from(GoLeftAction::Left);
    let (obs, _) = env.reset(None, None);
    println!("Initial observation: {:?}", obs);
    env.render();

    for step in 1..=args.grid_size.max(1) {
        println!("Step {step}");
        let result = match env.step(&left) {
            Ok(result) => result,
            Err(err) => panic!("go-left step failed: {err}"),
        };
        println!(
            "obs={:?} reward={} done={}",
            result.obs,
            result.reward,
            result.done()
        );
        env.render();

        if result.done() {
            println!("Goal reached! reward={}", result.reward);
            break;
        }
    }

    let mut logger = CsvLogger::new(args.log_path, false, true);
    if let Err(err) = logger.check_can_log(true) {
        panic!("Error setting up logger: {err}");
    }

    let mut policy: Box<dyn Policy<Vec<f32>, usize>> = match args.policy {
        PolicyKind::Left => Box::new(FixedActionPolicy::new(left)),
        PolicyKind::Random => Box::new(RandomPolicy::new(env.action_space())),
    };

    let eval_env = env_config.init();
    let mut eval_env: TimeLimitWrapper<Vec<f32>, usize> =
        TimeLimitWrapper::new(Box::new(eval_env), args.max_steps);
    let eval_config = EvalConfig::new()
        .with_n_eval_episodes(args.episodes)
        .with_render(args.render)
        .with_show_progress(!args.render);

    let result = match evaluate_policy(&mut *policy, &mut eval_env, &eval_config) {
        Ok(result) => result,
        Err(err) => panic!("evaluation failed: {err}"),
    };
    eval_env.close();

    for episode in &result.episodes {
        logger.log(LogItem::from(episode));
    }
    logger.log(LogItem::from(&result));
    logger.print_last();

    if let Err(err) = logger.dump() {
        panic!("Error dumping logs: {err}");
    }
}
