use super::spaces::Space;

/// Chooses an action from an observation.
///
/// Policies here do not learn. They exist to drive rollouts and
/// evaluation, roughly the role `predict` plays in stable-baselines3.
pub trait Policy<O, A> {
    fn act(&mut self, obs: &O) -> A;
}

/// Always takes the same action, whatever the observation.
#[derive(Debug, Clone)]
pub struct FixedActionPolicy<A> {
    action: A,
}

impl<A> FixedActionPolicy<A> {
    pub fn new(action: A) -> Self {
        Self { action }
    }
}

impl<O, A: Clone> Policy<O, A> for FixedActionPolicy<A> {
    fn act(&mut self, _obs: &O) -> A {
        self.action.clone()
    }
}

/// Samples uniformly from an action space.
#[derive(Clone)]
pub struct RandomPolicy<A: Clone> {
    action_space: Box<dyn Space<A>>,
}

impl<A: Clone> RandomPolicy<A> {
    pub fn new(action_space: Box<dyn Space<A>>) -> Self {
        Self { action_space }
    }
}

impl<O, A: Clone> Policy<O, A> for RandomPolicy<A> {
    fn act(&mut self, _obs: &O) -> A {
        self.action_space.sample()
    }
}

impl<O, A, F> Policy<O, A> for F
where
    F: FnMut(&O) -> A,
{
    fn act(&mut self, obs: &O) -> A {
        self(obs)
    }
}
