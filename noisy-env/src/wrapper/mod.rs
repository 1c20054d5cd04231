use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{
    environment::{Environment, Reward, Step},
    Result,
};

pub mod observation;
pub mod reward;

/// Per-call hooks a [`Noisy`] wrapper applies to what its environment returns.
///
/// Every hook passes its input through untouched unless overridden.
pub trait Transform<O> {
    /// Called with the observation produced by `reset`.
    fn reset<R: Rng + ?Sized>(&mut self, observation: O, _rng: &mut R) -> Result<O> {
        Ok(observation)
    }

    /// Called with the observation produced by `step`.
    fn observation<R: Rng + ?Sized>(&mut self, observation: O, _rng: &mut R) -> Result<O> {
        Ok(observation)
    }

    fn reward<R: Rng + ?Sized>(&mut self, reward: Reward, _rng: &mut R) -> Result<Reward> {
        Ok(reward)
    }
}

/// An environment whose observations or rewards pass through a [`Transform`].
///
/// `Noisy` is itself an [`Environment`], so wrappers nest:
/// `Noisy<Noisy<CartPole, ObservationNoise<_>, _>, RewardNoise, _>`.
pub struct Noisy<E: Environment, T, R> {
    env: E,
    transform: T,
    rng: R,
}

impl<E, T, R> Noisy<E, T, R>
where
    E: Environment,
    T: Transform<E::Observation>,
    R: Rng,
{
    pub fn new(env: E, transform: T, rng: R) -> Self {
        Noisy {
            env,
            transform,
            rng,
        }
    }

    pub fn inner(&self) -> &E {
        &self.env
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn into_inner(self) -> E {
        self.env
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }
}

impl<E, T> Noisy<E, T, StdRng>
where
    E: Environment,
    T: Transform<E::Observation>,
{
    pub fn seeded(env: E, transform: T, seed: u64) -> Self {
        Self::new(env, transform, StdRng::seed_from_u64(seed))
    }
}

impl<E, T, R> Environment for Noisy<E, T, R>
where
    E: Environment,
    T: Transform<E::Observation>,
    R: Rng,
{
    type Action = E::Action;
    type Observation = E::Observation;
    type Info = E::Info;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, Self::Info)> {
        let (observation, info) = self.env.reset(seed)?;
        debug!(?seed, "resetting noisy environment");
        let observation = self.transform.reset(observation, &mut self.rng)?;
        Ok((observation, info))
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation, Self::Info>> {
        let step = self.env.step(action)?;
        let observation = self.transform.observation(step.observation, &mut self.rng)?;
        let reward = self.transform.reward(step.reward, &mut self.rng)?;
        Ok(Step {
            observation,
            reward,
            ..step
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{
        observation::{DropoutObservationConfig, UniformObservationConfig},
        reward::UniformRewardConfig,
        *,
    };
    use crate::environment::cart_pole::{CartPole, CartPoleAction};

    const SEED: u64 = 333;

    struct Identity;

    impl<O> Transform<O> for Identity {}

    #[test]
    fn test_identity_transform() {
        let mut env = CartPole::new();
        let mut wrapped = Noisy::seeded(CartPole::new(), Identity, 0);
        assert_eq!(env.reset(Some(SEED)).unwrap(), wrapped.reset(Some(SEED)).unwrap());
        for _ in 0..10 {
            assert_eq!(
                env.step(CartPoleAction::Left).unwrap(),
                wrapped.step(CartPoleAction::Left).unwrap()
            );
        }
    }

    #[test]
    fn test_wraps_borrowed_environment() {
        let mut base = CartPole::new();
        {
            let transform = DropoutObservationConfig::new()
                .with_noise_rate(1.0)
                .with_p(1.0)
                .init();
            let mut wrapped = Noisy::new(&mut base, transform, StdRng::seed_from_u64(SEED));
            let (obs, _) = wrapped.reset(Some(SEED)).unwrap();
            assert_eq!(obs, [0.0; 4]);
        }
        // The borrowed environment keeps its episode after the wrapper is gone.
        let step = base.step(CartPoleAction::Right).unwrap();
        assert_eq!(step.reward, 1.0);
    }

    #[test]
    fn test_nested_wrappers() {
        let observation_noise = UniformObservationConfig::new()
            .with_noise_rate(1.0)
            .with_low(1.0)
            .with_high(1.0)
            .init();
        let reward_noise = UniformRewardConfig::new()
            .with_noise_rate(1.0)
            .with_low(1.0)
            .with_high(1.0)
            .init();
        let inner = Noisy::seeded(CartPole::new(), observation_noise, 1);
        let mut wrapped = Noisy::seeded(inner, reward_noise, 2);

        let mut env = CartPole::new();
        let (obs, _) = env.reset(Some(SEED)).unwrap();
        let (wrapped_obs, _) = wrapped.reset(Some(SEED)).unwrap();
        assert_eq!(wrapped_obs, obs.map(|x| x + 1.0));

        let step = env.step(CartPoleAction::Right).unwrap();
        let wrapped_step = wrapped.step(CartPoleAction::Right).unwrap();
        assert_eq!(wrapped_step.observation, step.observation.map(|x| x + 1.0));
        assert_eq!(wrapped_step.reward, step.reward + 1.0);
        assert_eq!(wrapped_step.terminated, step.terminated);
        assert_eq!(wrapped_step.truncated, step.truncated);
    }

    #[test]
    fn test_environment_errors_propagate() {
        let transform = DropoutObservationConfig::new().init();
        let mut wrapped = Noisy::seeded(CartPole::new(), transform, SEED);
        assert!(matches!(
            wrapped.step(CartPoleAction::Left),
            Err(crate::Error::NotReset)
        ));
    }
}
