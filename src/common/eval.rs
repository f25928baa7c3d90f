use burn::config::Config;
use core::fmt::Debug;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::{common::utils::mean, env::base::Env};

use super::{error::EnvError, policy::Policy};

/// Summary of one finished episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub length: usize,
    pub reward: f32,
    /// false when the episode was cut off by a limit rather than ending
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub episodes: Vec<EpisodeRecord>,
    pub mean_len: f32,
    pub mean_reward: f32,
}

#[derive(Config)]
pub struct EvalConfig {
    #[config(default = 10)]
    pub n_eval_episodes: usize,
    /// Hard cap on episode length, on top of any wrapper. Without one,
    /// a policy that never reaches a terminal state loops forever.
    #[config(default = "None")]
    pub max_episode_steps: Option<usize>,
    #[config(default = false)]
    pub render: bool,
    #[config(default = false)]
    pub show_progress: bool,
    #[config(default = false)]
    pub print_obs: bool,
    #[config(default = false)]
    pub print_action: bool,
    #[config(default = false)]
    pub print_reward: bool,
    #[config(default = false)]
    pub print_done: bool,
}

fn progress_bar(cfg: &EvalConfig) -> ProgressBar {
    if !cfg.show_progress {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template("{pos:>7}/{len:7} {bar} [{elapsed_precise}], eta: [{eta}]")
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    ProgressBar::new(cfg.n_eval_episodes as u64).with_style(style)
}

/// Runs `cfg.n_eval_episodes` episodes of `policy` on `env`.
///
/// The env is reset before every episode. An invalid action from the
/// policy aborts the evaluation.
///
/// With `n_eval_episodes == 0` no episode runs and both means are NaN.
pub fn evaluate_policy<O, A, P, E>(
    policy: &mut P,
    env: &mut E,
    cfg: &EvalConfig,
) -> Result<EvalResult, EnvError>
where
    O: Clone + Debug,
    A: Clone + Debug,
    P: Policy<O, A> + ?Sized,
    E: Env<O, A> + ?Sized,
{
    let mut episodes = Vec::with_capacity(cfg.n_eval_episodes);
    let bar = progress_bar(cfg);

    info!("Starting evaluation over {} episodes", cfg.n_eval_episodes);

    for episode in 0..cfg.n_eval_episodes {
        let (mut state, _) = env.reset(None, None);
        let mut running_reward = 0.0;
        let mut ep_len = 0;

        if cfg.render {
            env.render();
        }

        let terminated = loop {
            if cfg.print_obs {
                println!("state: {:?}", state);
            }

            let action = policy.act(&state);

            if cfg.print_action {
                println!("action: {:?}", action);
            }

            let step_sample = env.step(&action)?;

            running_reward += step_sample.reward;
            ep_len += 1;

            if cfg.render {
                env.render();
            }

            if cfg.print_reward {
                println!("reward: {:?}", step_sample.reward);
            }

            let capped = cfg.max_episode_steps.is_some_and(|max| ep_len >= max);
            let done = step_sample.done() | capped;

            if cfg.print_done {
                println!("done: {:?}", done);
            }

            if done {
                break step_sample.terminated;
            }

            state = step_sample.obs;
        };

        episodes.push(EpisodeRecord {
            episode,
            length: ep_len,
            reward: running_reward,
            terminated,
        });
        bar.inc(1);
    }

    bar.finish_and_clear();

    let lengths: Vec<f32> = episodes.iter().map(|e| e.length as f32).collect();
    let rewards: Vec<f32> = episodes.iter().map(|e| e.reward).collect();

    let result = EvalResult {
        mean_len: mean(&lengths),
        mean_reward: mean(&rewards),
        episodes,
    };

    info!(
        "Evaluation complete: mean reward {:.3}, mean length {:.3}",
        result.mean_reward, result.mean_len
    );

    Ok(result)
}
