use rand::Rng;

use crate::Result;

pub type Reward = f64;

/// Everything an environment reports after one action.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<O, I> {
    pub observation: O,
    pub reward: Reward,
    pub terminated: bool,
    pub truncated: bool,
    pub info: I,
}

impl<O, I> Step<O, I> {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

pub trait Environment {
    type Action: Space;
    type Observation;
    type Info;

    /// Starts a new episode. `Some(seed)` reseeds the environment's own randomness.
    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, Self::Info)>;

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation, Self::Info>>;
}

pub trait Space: Clone {
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

// Lets a wrapper borrow an environment that is owned elsewhere.
impl<E: Environment + ?Sized> Environment for &mut E {
    type Action = E::Action;
    type Observation = E::Observation;
    type Info = E::Info;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, Self::Info)> {
        (**self).reset(seed)
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation, Self::Info>> {
        (**self).step(action)
    }
}

pub mod cart_pole;
#[cfg(feature = "gym-rs")]
pub mod gym_rs;
