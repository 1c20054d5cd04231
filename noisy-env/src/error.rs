/// Errors raised while stepping an environment or drawing noise.
///
/// Distribution errors only surface at the first draw that needs the
/// offending parameters, never when a transform is constructed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Normal distribution with a negative or non-finite scale.
    #[error("invalid normal distribution: {0}")]
    Normal(#[from] rand_distr::NormalError),

    /// Per-element keep probability outside [0, 1].
    #[error("invalid dropout probability: {0}")]
    Bernoulli(#[from] rand::distributions::BernoulliError),

    /// Uniform distribution whose bounds are unordered, not finite, or too far apart.
    #[error("invalid uniform bounds: low {low} must not exceed high {high} and both must be finite")]
    InvalidBounds { low: f64, high: f64 },

    /// Scaling factors that cannot broadcast over the observation.
    #[error("cannot broadcast {size} scaling factors over an observation of shape {shape:?}")]
    IncompatibleSize { size: usize, shape: Vec<usize> },

    /// Mixup memory whose shape differs from the incoming observation.
    #[error("cannot mix an observation of shape {found:?} with a previous observation of shape {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// `step` called before the first `reset`.
    #[error("environment must be reset before it is stepped")]
    NotReset,
}

pub type Result<T> = std::result::Result<T, Error>;
