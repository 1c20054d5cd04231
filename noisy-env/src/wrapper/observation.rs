use burn::config::Config;
use rand::Rng;
use tracing::{trace, warn};

use super::Transform;
use crate::{
    elementwise::Elementwise,
    noise::{self, ScaleSize},
};

/// The perturbations an [`ObservationNoise`] can apply.
#[derive(Clone, Debug, PartialEq)]
pub enum ObservationPerturbation {
    /// Convex combination with the previously emitted observation.
    Mixup { factor: f64 },
    /// Zero each element independently with probability `p`.
    Dropout { p: f64 },
    /// Add Normal(loc, scale) noise to every element.
    Normal { loc: f64, scale: f64 },
    /// Add Uniform(low, high) noise to every element.
    Uniform { low: f64, high: f64 },
    /// Multiply by Uniform(low, high) factors, `size` of them, broadcast.
    UniformScale { low: f64, high: f64, size: ScaleSize },
}

/// Perturbs each observation with probability `noise_rate`.
///
/// The mixup variant remembers the last observation it emitted. That memory
/// is seeded by every reset, updated after every step whether or not the
/// trial fired, and starts out empty; while empty, observations pass through.
#[derive(Clone, Debug)]
pub struct ObservationNoise<O> {
    noise_rate: f64,
    perturbation: ObservationPerturbation,
    last_observation: Option<O>,
}

impl<O> ObservationNoise<O> {
    pub fn new(noise_rate: f64, perturbation: ObservationPerturbation) -> Self {
        if !(0.0..=1.0).contains(&noise_rate) {
            warn!(noise_rate, "noise rate outside [0, 1]; perturbation will always or never apply");
        }
        ObservationNoise {
            noise_rate,
            perturbation,
            last_observation: None,
        }
    }

    pub fn noise_rate(&self) -> f64 {
        self.noise_rate
    }

    pub fn perturbation(&self) -> &ObservationPerturbation {
        &self.perturbation
    }

    pub fn last_observation(&self) -> Option<&O> {
        self.last_observation.as_ref()
    }
}

impl<O: Elementwise> ObservationNoise<O> {
    fn perturb<R: Rng + ?Sized>(&self, observation: O, rng: &mut R) -> crate::Result<O> {
        trace!(perturbation = ?self.perturbation, "perturbing observation");
        let n = observation.num_elements();
        let observation = match self.perturbation {
            ObservationPerturbation::Mixup { factor } => match &self.last_observation {
                Some(last) => {
                    let (expected, found) = (last.shape(), observation.shape());
                    if expected != found {
                        return Err(crate::Error::ShapeMismatch { expected, found });
                    }
                    observation.mix(last, factor)
                }
                None => observation,
            },
            ObservationPerturbation::Dropout { p } => {
                let mask = noise::dropout_mask(rng, p, n)?;
                observation.mul_values(&mask)
            }
            ObservationPerturbation::Normal { loc, scale } => {
                let noise = noise::normal(rng, loc, scale, n)?;
                observation.add_values(&noise)
            }
            ObservationPerturbation::Uniform { low, high } => {
                let noise = noise::uniform(rng, low, high, n)?;
                observation.add_values(&noise)
            }
            ObservationPerturbation::UniformScale { low, high, size } => {
                let shape = observation.shape();
                let factors = noise::uniform(rng, low, high, size.count(&shape))?;
                let factors = noise::broadcast(factors, &shape)?;
                observation.mul_values(&factors)
            }
        };
        Ok(observation)
    }

    fn is_mixup(&self) -> bool {
        matches!(self.perturbation, ObservationPerturbation::Mixup { .. })
    }
}

impl<O: Elementwise> Transform<O> for ObservationNoise<O> {
    fn reset<R: Rng + ?Sized>(&mut self, observation: O, rng: &mut R) -> crate::Result<O> {
        if self.is_mixup() {
            self.last_observation = Some(observation.clone());
            return Ok(observation);
        }
        self.observation(observation, rng)
    }

    fn observation<R: Rng + ?Sized>(&mut self, observation: O, rng: &mut R) -> crate::Result<O> {
        let observation = if noise::trial(rng, self.noise_rate) {
            self.perturb(observation, rng)?
        } else {
            observation
        };
        if self.is_mixup() {
            self.last_observation = Some(observation.clone());
        }
        Ok(observation)
    }
}

#[derive(Config)]
pub struct MixupObservationConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = 0.5)]
    factor: f64,
}

impl MixupObservationConfig {
    pub fn init<O>(&self) -> ObservationNoise<O> {
        ObservationNoise::new(
            self.noise_rate,
            ObservationPerturbation::Mixup {
                factor: self.factor,
            },
        )
    }
}

#[derive(Config)]
pub struct DropoutObservationConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = 0.1)]
    p: f64,
}

impl DropoutObservationConfig {
    pub fn init<O>(&self) -> ObservationNoise<O> {
        ObservationNoise::new(
            self.noise_rate,
            ObservationPerturbation::Dropout { p: self.p },
        )
    }
}

#[derive(Config)]
pub struct NormalObservationConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = 0.0)]
    loc: f64,
    #[config(default = 0.01)]
    scale: f64,
}

impl NormalObservationConfig {
    pub fn init<O>(&self) -> ObservationNoise<O> {
        ObservationNoise::new(
            self.noise_rate,
            ObservationPerturbation::Normal {
                loc: self.loc,
                scale: self.scale,
            },
        )
    }
}

#[derive(Config)]
pub struct UniformObservationConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = "-0.1")]
    low: f64,
    #[config(default = 0.1)]
    high: f64,
}

impl UniformObservationConfig {
    pub fn init<O>(&self) -> ObservationNoise<O> {
        ObservationNoise::new(
            self.noise_rate,
            ObservationPerturbation::Uniform {
                low: self.low,
                high: self.high,
            },
        )
    }
}

#[derive(Config)]
pub struct UniformScaleObservationConfig {
    #[config(default = 0.01)]
    noise_rate: f64,
    #[config(default = 0.9)]
    low: f64,
    #[config(default = 1.1)]
    high: f64,
    #[config(default = "ScaleSize::Shared")]
    size: ScaleSize,
}

impl UniformScaleObservationConfig {
    pub fn init<O>(&self) -> ObservationNoise<O> {
        ObservationNoise::new(
            self.noise_rate,
            ObservationPerturbation::UniformScale {
                low: self.low,
                high: self.high,
                size: self.size,
            },
        )
    }
}
