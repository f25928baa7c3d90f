use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::{error::EnvError, logger::LogData, spaces::Space};

/// Values an env may put in its step/reset info map.
///
/// `GoLeftEnv` always returns an empty map; wrappers and other envs use
/// these to attach diagnostics such as a final observation (`Obs`) or a
/// nested map (`InfoDict`).
#[derive(Debug, Clone, PartialEq)]
pub enum InfoData<O> {
    String(String),
    Float(f32),
    Int(i32),
    Obs(O),
    InfoDict(Info<O>),
}

pub type ResetOptions = HashMap<String, LogData>;
pub type Info<O> = HashMap<String, InfoData<O>>;

/// The result of a single `Env::step`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvObservation<O> {
    pub obs: O,
    pub reward: f32,
    /// The episode reached a goal or failure state.
    pub terminated: bool,
    /// The episode was cut short by an external limit, e.g. a time limit.
    pub truncated: bool,
    pub info: Info<O>,
}

impl<O> EnvObservation<O> {
    pub fn done(&self) -> bool {
        self.terminated | self.truncated
    }
}

#[derive(Clone, Debug, Copy, PartialEq)]
pub struct RewardRange {
    pub low: f32,
    pub high: f32,
}

/// Ways an environment can present itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// A single line of text on stdout.
    Console,
}

/// Static description of an environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvMetadata {
    pub render_modes: Vec<RenderMode>,
}

/// Gymnasium-style environment on observations `O` and actions `A`.
///
/// `step` is the only fallible operation: an action outside
/// `action_space` is rejected and leaves the environment untouched.
pub trait Env<O: Clone, A: Clone>: Send {
    fn step(&mut self, action: &A) -> Result<EnvObservation<O>, EnvError>;
    fn reset(&mut self, seed: Option<u64>, options: Option<ResetOptions>) -> (O, Info<O>);
    fn action_space(&self) -> Box<dyn Space<A>>;
    fn observation_space(&self) -> Box<dyn Space<O>>;
    fn reward_range(&self) -> RewardRange;
    fn metadata(&self) -> EnvMetadata;
    fn render(&self);
    fn renderable(&self) -> bool;
    fn close(&mut self);
    fn unwrapped(&self) -> &dyn Env<O, A>;
}
