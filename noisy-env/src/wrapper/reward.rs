use burn::config::Config;
use rand::Rng;
use tracing::{trace, warn};

use super::Transform;
use crate::{environment::Reward, noise};

#[derive(Clone, Debug, PartialEq)]
pub enum RewardPerturbation {
    /// Multiply by a Uniform(low, high) factor.
    UniformScale { low: f64, high: f64 },
    /// Add Uniform(low, high) noise.
    Uniform { low: f64, high: f64 },
    /// Add Normal(loc, scale) noise.
    Normal { loc: f64, scale: f64 },
}

/// Perturbs each reward with probability `noise_rate`. Holds no state between calls.
#[derive(Clone, Debug)]
pub struct RewardNoise {
    noise_rate: f64,
    perturbation: RewardPerturbation,
}

impl RewardNoise {
    pub fn new(noise_rate: f64, perturbation: RewardPerturbation) -> Self {
        if !(0.0..=1.0).contains(&noise_rate) {
            warn!(noise_rate, "noise rate outside [0, 1]; perturbation will always or never apply");
        }
        RewardNoise {
            noise_rate,
            perturbation,
        }
    }

    pub fn noise_rate(&self) -> f64 {
        self.noise_rate
    }

    pub fn perturbation(&self) -> &RewardPerturbation {
        &self.perturbation
    }

    fn perturb<R: Rng + ?Sized>(&self, reward: Reward, rng: &mut R) -> crate::Result<Reward> {
        trace!(perturbation = ?self.perturbation, reward, "perturbing reward");
        let reward = match self.perturbation {
            RewardPerturbation::UniformScale { low, high } => {
                reward * noise::uniform(rng, low, high, 1)?[0]
            }
            RewardPerturbation::Uniform { low, high } => {
                reward + noise::uniform(rng, low, high, 1)?[0]
            }
            RewardPerturbation::Normal { loc, scale } => {
                reward + noise::normal(rng, loc, scale, 1)?[0]
            }
        };
        Ok(reward)
    }
}

impl<O> Transform<O> for RewardNoise {
    fn reward<R: Rng + ?Sized>(&mut self, reward: Reward, rng: &mut R) -> crate::Result<Reward> {
        if noise::trial(rng, self.noise_rate) {
            self.perturb(reward, rng)
        } else {
            Ok(reward)
        }
    }
}

#[derive(Config)]
pub struct UniformScaleRewardConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = 0.9)]
    low: f64,
    #[config(default = 1.1)]
    high: f64,
}

impl UniformScaleRewardConfig {
    pub fn init(&self) -> RewardNoise {
        RewardNoise::new(
            self.noise_rate,
            RewardPerturbation::UniformScale {
                low: self.low,
                high: self.high,
            },
        )
    }
}

#[derive(Config)]
pub struct UniformRewardConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = "-0.01")]
    low: f64,
    #[config(default = 0.01)]
    high: f64,
}

impl UniformRewardConfig {
    pub fn init(&self) -> RewardNoise {
        RewardNoise::new(
            self.noise_rate,
            RewardPerturbation::Uniform {
                low: self.low,
                high: self.high,
            },
        )
    }
}

#[derive(Config)]
pub struct NormalRewardConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = 0.0)]
    loc: f64,
    #[config(default = 0.01)]
    scale: f64,
}

impl NormalRewardConfig {
    pub fn init(&self) -> RewardNoise {
        RewardNoise::new(
            self.noise_rate,
            RewardPerturbation::Normal {
                loc: self.loc,
                scale: self.scale,
            },
        )
    }
}
