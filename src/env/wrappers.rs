use crate::common::{error::EnvError, spaces::Space};

use super::base::{Env, EnvMetadata, EnvObservation, Info, ResetOptions, RewardRange};

/// Marks an episode as truncated once `max_steps` steps have been taken
/// since the last reset.
pub struct TimeLimitWrapper<O: Clone, A: Clone> {
    env: Box<dyn Env<O, A>>,
    max_steps: usize,
    curr_steps: usize,
}

impl<O: Clone, A: Clone> TimeLimitWrapper<O, A> {
    pub fn new(env: Box<dyn Env<O, A>>, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            curr_steps: 0,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn elapsed_steps(&self) -> usize {
        self.curr_steps
    }
}

impl<O: Clone, A: Clone> Env<O, A> for TimeLimitWrapper<O, A> {
    fn step(&mut self, action: &A) -> Result<EnvObservation<O>, EnvError> {
        // rejected actions don't count against the limit
        let mut step_result = self.env.step(action)?;

        self.curr_steps += 1;
        step_result.truncated |= self.curr_steps >= self.max_steps;

        Ok(step_result)
    }

    fn reset(&mut self, seed: Option<u64>, options: Option<ResetOptions>) -> (O, Info<O>) {
        self.curr_steps = 0;

        self.env.reset(seed, options)
    }

    fn action_space(&self) -> Box<dyn Space<A>> {
        self.env.action_space()
    }

    fn observation_space(&self) -> Box<dyn Space<O>> {
        self.env.observation_space()
    }

    fn reward_range(&self) -> RewardRange {
        self.env.reward_range()
    }

    fn metadata(&self) -> EnvMetadata {
        self.env.metadata()
    }

    fn render(&self) {
        self.env.render()
    }

    fn renderable(&self) -> bool {
        self.env.renderable()
    }

    fn close(&mut self) {
        self.env.close()
    }

    fn unwrapped(&self) -> &dyn Env<O, A> {
        self.env.unwrapped()
    }
}
