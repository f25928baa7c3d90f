use burn::config::Config;
use log::debug;

use crate::common::{
    error::EnvError,
    spaces::{BoxSpace, Discrete, Space},
    utils::clip,
};

use super::base::{
    Env, EnvMetadata, EnvObservation, Info, RenderMode, ResetOptions, RewardRange,
};

/// Actions accepted by [`GoLeftEnv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoLeftAction {
    Left = 0,
    Right = 1,
}

impl GoLeftAction {
    pub const COUNT: usize = 2;
}

impl TryFrom<usize> for GoLeftAction {
    type Error = EnvError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GoLeftAction::Left),
            1 => Ok(GoLeftAction::Right),
            action => Err(EnvError::InvalidAction {
                action,
                n_actions: Self::COUNT,
            }),
        }
    }
}

impl From<GoLeftAction> for usize {
    fn from(value: GoLeftAction) -> Self {
        value as usize
    }
}

#[derive(Config)]
pub struct GoLeftConfig {
    /// Length of the line. The agent starts at `grid_size - 1`.
    #[config(default = 10)]
    pub grid_size: i64,
    #[config(default = "Some(RenderMode::Console)")]
    pub render_mode: Option<RenderMode>,
}

impl GoLeftConfig {
    pub fn init(&self) -> GoLeftEnv {
        GoLeftEnv::new(self.grid_size, self.render_mode)
    }
}

/// A 1-D walk where the agent must reach cell 0.
///
/// The agent starts at `grid_size - 1` and moves one cell left or right
/// per step. Positions are clipped into `[0, grid_size]`; note the upper
/// bound is `grid_size` itself, so a right move from the start lands one
/// cell past it. Reaching 0 terminates the episode with a reward of 1,
/// every other step gives 0. The env never truncates and never resets
/// itself.
///
/// `grid_size` is not validated. Non-positive sizes produce a start
/// position at or below 0 and the clip then pins the agent to
/// `grid_size`. Moves saturate at the `i64` bounds instead of
/// overflowing.
#[derive(Debug, Clone)]
pub struct GoLeftEnv {
    grid_size: i64,
    render_mode: Option<RenderMode>,
    position: i64,
}

impl Default for GoLeftEnv {
    fn default() -> Self {
        GoLeftConfig::new().init()
    }
}

impl GoLeftEnv {
    pub fn new(grid_size: i64, render_mode: Option<RenderMode>) -> Self {
        Self {
            grid_size,
            render_mode,
            position: grid_size.saturating_sub(1),
        }
    }

    pub fn grid_size(&self) -> i64 {
        self.grid_size
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn render_mode(&self) -> Option<RenderMode> {
        self.render_mode
    }

    fn obs(&self) -> Vec<f32> {
        vec![self.position as f32]
    }

    /// The console frame: one `.` per cell left of the agent, an `x`,
    /// then `grid_size - position` dots.
    pub fn render_line(&self) -> String {
        let left = self.position.max(0) as usize;
        let right = self.grid_size.saturating_sub(self.position).max(0) as usize;

        format!("{}x{}", ".".repeat(left), ".".repeat(right))
    }
}

impl Env<Vec<f32>, usize> for GoLeftEnv {
    fn step(&mut self, action: &usize) -> Result<EnvObservation<Vec<f32>>, EnvError> {
        let action = GoLeftAction::try_from(*action)?;

        let moved = match action {
            GoLeftAction::Left => self.position.saturating_sub(1),
            GoLeftAction::Right => self.position.saturating_add(1),
        };
        self.position = clip(moved, 0, self.grid_size);

        let terminated = self.position == 0;
        let reward = if terminated { 1.0 } else { 0.0 };

        debug!(
            "go-left step: action={:?} position={} terminated={}",
            action, self.position, terminated
        );

        Ok(EnvObservation {
            obs: self.obs(),
            reward,
            terminated,
            truncated: false,
            info: Info::new(),
        })
    }

    fn reset(
        &mut self,
        _seed: Option<u64>,
        _options: Option<ResetOptions>,
    ) -> (Vec<f32>, Info<Vec<f32>>) {
        self.position = self.grid_size.saturating_sub(1);
        debug!("go-left reset: position={}", self.position);

        (self.obs(), Info::new())
    }

    fn action_space(&self) -> Box<dyn Space<usize>> {
        // 0 -> left
        // 1 -> right
        Box::new(Discrete::from(GoLeftAction::COUNT))
    }

    fn observation_space(&self) -> Box<dyn Space<Vec<f32>>> {
        Box::new(BoxSpace::from((vec![0.0], vec![self.grid_size as f32])))
    }

    fn reward_range(&self) -> RewardRange {
        RewardRange {
            low: 0.0,
            high: 1.0,
        }
    }

    fn metadata(&self) -> EnvMetadata {
        EnvMetadata {
            render_modes: vec![RenderMode::Console],
        }
    }

    fn render(&self) {
        if self.renderable() {
            println!("{}", self.render_line());
        }
    }

    fn renderable(&self) -> bool {
        self.render_mode == Some(RenderMode::Console)
    }

    fn close(&mut self) {}

    fn unwrapped(&self) -> &dyn Env<Vec<f32>, usize> {
        self
    }
}

#[cfg(test)]
mod tests {
    use burn::config::Config;
    use tempdir::TempDir;

    use crate::common::error::EnvError;
    use crate::env::base::{Env, RenderMode};

    use super::{GoLeftAction, GoLeftConfig, GoLeftEnv};

    const LEFT: usize = GoLeftAction::Left as usize;
    const RIGHT: usize = GoLeftAction::Right as usize;

    #[test]
    fn test_go_left_default() {
        let env = GoLeftEnv::default();

        assert_eq!(env.grid_size(), 10);
        assert_eq!(env.position(), 9);
        assert_eq!(env.render_mode(), Some(RenderMode::Console));
        assert!(env.renderable());
    }

    #[test]
    fn test_go_left_config() {
        let env = GoLeftConfig::new()
            .with_grid_size(5)
            .with_render_mode(None)
            .init();

        assert_eq!(env.grid_size(), 5);
        assert_eq!(env.position(), 4);
        assert!(!env.renderable());
    }

    #[test]
    fn test_go_left_reset() {
        let mut env = GoLeftEnv::default();
        env.step(&LEFT).unwrap();
        env.step(&LEFT).unwrap();

        let (obs, info) = env.reset(Some(42), None);

        assert_eq!(obs, vec![9.0]);
        assert!(info.is_empty());
        assert_eq!(env.position(), 9);
    }

    #[test]
    fn test_go_left_reaches_goal() {
        let mut env = GoLeftEnv::default();
        env.reset(None, None);

        for expected in (1..=8).rev() {
            let result = env.step(&LEFT).unwrap();

            assert_eq!(result.obs, vec![expected as f32]);
            assert_eq!(result.reward, 0.0);
            assert!(!result.terminated);
            assert!(!result.truncated);
            assert!(result.info.is_empty());
        }

        let result = env.step(&LEFT).unwrap();

        assert_eq!(result.obs, vec![0.0]);
        assert_eq!(result.reward, 1.0);
        assert!(result.terminated);
        assert!(!result.truncated);
    }

    #[test]
    fn test_go_left_right_clips_past_start() {
        let mut env = GoLeftEnv::default();
        env.reset(None, None);

        let result = env.step(&RIGHT).unwrap();

        assert_eq!(result.obs, vec![10.0]);
        assert_eq!(result.reward, 0.0);
        assert!(!result.terminated);

        let result = env.step(&RIGHT).unwrap();
        assert_eq!(result.obs, vec![10.0]);
    }

    #[test]
    fn test_go_left_stays_at_goal() {
        let mut env = GoLeftEnv::new(2, None);
        env.reset(None, None);

        assert!(env.step(&LEFT).unwrap().terminated);

        // no auto reset: a further left move stays on the goal
        let result = env.step(&LEFT).unwrap();
        assert_eq!(result.obs, vec![0.0]);
        assert!(result.terminated);
        assert_eq!(result.reward, 1.0);
    }

    #[test]
    fn test_go_left_invalid_action() {
        let mut env = GoLeftEnv::default();
        env.reset(None, None);
        env.step(&LEFT).unwrap();

        let err = env.step(&2).unwrap_err();

        assert_eq!(
            err,
            EnvError::InvalidAction {
                action: 2,
                n_actions: 2
            }
        );
        assert_eq!(env.position(), 8);
    }

    #[test]
    fn test_go_left_position_stays_in_bounds() {
        let mut env = GoLeftEnv::new(4, None);
        env.reset(None, None);
        let mut action_space = env.action_space();
        let obs_space = env.observation_space();

        for _ in 0..200 {
            let result = env.step(&action_space.sample()).unwrap();

            assert!((0..=4).contains(&env.position()));
            assert!(obs_space.contains(&result.obs));
            assert_eq!(result.terminated, env.position() == 0);
            assert_eq!(result.reward == 1.0, result.terminated);
            assert!(!result.truncated);

            if result.terminated {
                env.reset(None, None);
            }
        }
    }

    #[test]
    fn test_go_left_grid_size_one_starts_at_goal() {
        let mut env = GoLeftEnv::new(1, None);
        let (obs, _) = env.reset(None, None);

        assert_eq!(obs, vec![0.0]);
        assert_eq!(env.position(), 0);

        let result = env.step(&RIGHT).unwrap();
        assert_eq!(result.obs, vec![1.0]);
        assert!(!result.terminated);
    }

    #[test]
    fn test_go_left_non_positive_grid_size() {
        let mut env = GoLeftEnv::new(-3, None);
        assert_eq!(env.position(), -4);

        let result = env.step(&LEFT).unwrap();
        assert_eq!(result.obs, vec![-3.0]);
        assert!(!result.terminated);
    }

    #[test]
    fn test_go_left_spaces() {
        let env = GoLeftEnv::default();

        let action_space = env.action_space();
        assert_eq!(action_space.shape(), 2);
        assert!(action_space.contains(&LEFT));
        assert!(action_space.contains(&RIGHT));
        assert!(!action_space.contains(&2));

        let obs_space = env.observation_space();
        assert!(obs_space.contains(&vec![0.0]));
        assert!(obs_space.contains(&vec![10.0]));
        assert!(!obs_space.contains(&vec![10.5]));

        let range = env.reward_range();
        assert_eq!((range.low, range.high), (0.0, 1.0));
        assert_eq!(env.metadata().render_modes, vec![RenderMode::Console]);
    }

    #[test]
    fn test_go_left_render_line() {
        let mut env = GoLeftEnv::new(4, Some(RenderMode::Console));
        env.reset(None, None);
        assert_eq!(env.render_line(), "...x.");

        env.step(&RIGHT).unwrap();
        assert_eq!(env.render_line(), "....x");

        env.reset(None, None);
        for _ in 0..3 {
            env.step(&LEFT).unwrap();
        }
        assert_eq!(env.render_line(), "x....");

        env.render();
        env.close();
    }

    #[test]
    fn test_go_left_extreme_grid_size() {
        let mut env = GoLeftEnv::new(i64::MAX, None);
        env.reset(None, None);
        assert_eq!(env.position(), i64::MAX - 1);

        env.step(&RIGHT).unwrap();
        let result = env.step(&RIGHT).unwrap();
        assert_eq!(env.position(), i64::MAX);
        assert!(!result.terminated);
        assert_eq!(result.reward, 0.0);

        let mut env = GoLeftEnv::new(i64::MIN, None);
        assert_eq!(env.position(), i64::MIN);

        let result = env.step(&LEFT).unwrap();
        assert_eq!(env.position(), i64::MIN);
        assert!(!result.terminated);

        env.step(&RIGHT).unwrap();
        assert_eq!(env.position(), i64::MIN);

        let (_, info) = env.reset(None, None);
        assert!(info.is_empty());
        assert_eq!(env.position(), i64::MIN);
        assert_eq!(env.render_line(), "x");
    }

    #[test]
    fn test_go_left_config_save_load() {
        let dir = TempDir::new("go_left_config").unwrap();
        let pth = dir.path().join("go_left.json");

        let config = GoLeftConfig::new()
            .with_grid_size(7)
            .with_render_mode(None);
        config.save(&pth).unwrap();

        let loaded = GoLeftConfig::load(&pth).unwrap();
        assert_eq!(loaded.grid_size, 7);
        assert_eq!(loaded.render_mode, None);

        let env = loaded.init();
        assert_eq!(env.position(), 6);
        assert!(!env.renderable());
    }

    #[test]
    fn test_go_left_action_conversion() {
        assert_eq!(GoLeftAction::try_from(0usize), Ok(GoLeftAction::Left));
        assert_eq!(GoLeftAction::try_from(1usize), Ok(GoLeftAction::Right));
        assert!(GoLeftAction::try_from(7usize).is_err());
        assert_eq!(usize::from(GoLeftAction::Right), 1);
    }
}
