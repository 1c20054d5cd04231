use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal, NormalError, Uniform};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One Bernoulli trial deciding whether this call is perturbed.
///
/// A rate of 0 never fires and a rate of 1 always fires. Rates outside
/// [0, 1] (or NaN) saturate instead of failing.
pub fn trial<R: Rng + ?Sized>(rng: &mut R, noise_rate: f64) -> bool {
    rng.gen::<f64>() < noise_rate
}

/// Rejects a negative or NaN `scale`, which `Normal::new` would otherwise accept.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, loc: f64, scale: f64, n: usize) -> Result<Vec<f64>> {
    if !(scale >= 0.0) {
        return Err(NormalError::BadVariance.into());
    }
    let distribution = Normal::new(loc, scale)?;
    Ok(distribution.sample_iter(rng).take(n).collect())
}

/// Draws from the closed interval `[low, high]`; equal bounds yield `low` exactly.
///
/// The span is capped at half of `f64::MAX`, past which `Uniform` panics on overflow.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64, n: usize) -> Result<Vec<f64>> {
    if !(low <= high && high - low <= f64::MAX / 2.0) {
        return Err(Error::InvalidBounds { low, high });
    }
    let distribution = Uniform::new_inclusive(low, high);
    Ok(distribution.sample_iter(rng).take(n).collect())
}

/// Multiplicative mask zeroing each element independently with probability `p`.
pub fn dropout_mask<R: Rng + ?Sized>(rng: &mut R, p: f64, n: usize) -> Result<Vec<f64>> {
    let keep = Bernoulli::new(1.0 - p)?;
    Ok(keep
        .sample_iter(rng)
        .take(n)
        .map(|kept| if kept { 1.0 } else { 0.0 })
        .collect())
}

/// How many scaling factors a multiplicative perturbation draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleSize {
    /// A single factor shared by every element.
    #[default]
    Shared,
    /// One factor per element.
    PerElement,
    /// An explicit count, broadcast over the trailing axis.
    Count(usize),
}

impl ScaleSize {
    pub fn count(&self, shape: &[usize]) -> usize {
        match self {
            ScaleSize::Shared => 1,
            ScaleSize::PerElement => shape.iter().product(),
            ScaleSize::Count(n) => *n,
        }
    }
}

/// Expands `factors` to one value per element of an observation of `shape`.
///
/// A single factor covers everything; a factor count equal to the element
/// count is used as is; a count equal to the last dimension repeats along
/// every leading axis.
pub fn broadcast(factors: Vec<f64>, shape: &[usize]) -> Result<Vec<f64>> {
    let num_elements: usize = shape.iter().product();
    let size = factors.len();
    if size == num_elements {
        Ok(factors)
    } else if size == 1 {
        Ok(vec![factors[0]; num_elements])
    } else if size > 0 && shape.last() == Some(&size) {
        Ok(factors.iter().copied().cycle().take(num_elements).collect())
    } else {
        Err(Error::IncompatibleSize {
            size,
            shape: shape.to_vec(),
        })
    }
}
