use gym_rs::core::Env;
use rand::Rng;

use super::{Environment, Space, Step};
use crate::Result;

/// Index into a discrete action set of size `N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete<const N: usize>(pub usize);

impl<const N: usize> Space for Discrete<N> {
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Discrete(rng.gen_range(0..N))
    }
}

/// Exposes a gym-rs environment with `N` discrete actions.
pub struct GymEnvironment<T: Env, const N: usize> {
    env: T,
}

impl<T: Env, const N: usize> GymEnvironment<T, N> {
    pub fn from(env: T) -> Self {
        GymEnvironment { env }
    }
}

impl<T, const N: usize> Environment for GymEnvironment<T, N>
where
    T: Env<Action = usize>,
    T::Observation: Into<Vec<f64>>,
{
    type Action = Discrete<N>;
    type Observation = Vec<f64>;
    type Info = ();

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, Self::Info)> {
        let (obs, _) = self.env.reset(seed, false, None);
        Ok((obs.into(), ()))
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation, Self::Info>> {
        let action_reward = self.env.step(action.0);
        // gym-rs folds time limits into `done`
        Ok(Step {
            observation: action_reward.observation.into(),
            reward: *action_reward.reward.as_ref(),
            terminated: action_reward.done,
            truncated: false,
            info: (),
        })
    }
}
