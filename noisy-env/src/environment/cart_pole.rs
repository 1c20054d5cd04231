use burn::config::Config;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use super::{Environment, Space, Step};
use crate::Error;

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
const HALF_POLE_LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * HALF_POLE_LENGTH;
const FORCE_MAGNITUDE: f64 = 10.0;
const TAU: f64 = 0.02;
const X_THRESHOLD: f64 = 2.4;
const THETA_THRESHOLD: f64 = 12.0 * 2.0 * std::f64::consts::PI / 360.0;
const RESET_BOUND: f64 = 0.05;

/// Cart position, cart velocity, pole angle, pole angular velocity.
pub type CartPoleObservation = [f64; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartPoleAction {
    Left,
    Right,
}

impl Space for CartPoleAction {
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            CartPoleAction::Right
        } else {
            CartPoleAction::Left
        }
    }
}

#[derive(Config)]
pub struct CartPoleConfig {
    #[config(default = 500)]
    max_episode_steps: usize,
}

impl CartPoleConfig {
    pub fn init(&self) -> CartPole {
        CartPole {
            max_episode_steps: self.max_episode_steps,
            state: None,
            elapsed_steps: 0,
            terminated: false,
            rng: StdRng::from_entropy(),
        }
    }
}

/// Classic cart-pole balancing task with a time limit.
pub struct CartPole {
    max_episode_steps: usize,
    state: Option<CartPoleObservation>,
    elapsed_steps: usize,
    terminated: bool,
    rng: StdRng,
}

impl CartPole {
    pub fn new() -> Self {
        CartPoleConfig::new().init()
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for CartPole {
    type Action = CartPoleAction;
    type Observation = CartPoleObservation;
    type Info = ();

    fn reset(&mut self, seed: Option<u64>) -> crate::Result<(Self::Observation, Self::Info)> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let state: CartPoleObservation =
            std::array::from_fn(|_| self.rng.gen_range(-RESET_BOUND..RESET_BOUND));
        debug!(?seed, ?state, "cart pole reset");
        self.state = Some(state);
        self.elapsed_steps = 0;
        self.terminated = false;
        Ok((state, ()))
    }

    fn step(
        &mut self,
        action: Self::Action,
    ) -> crate::Result<Step<Self::Observation, Self::Info>> {
        let [x, x_dot, theta, theta_dot] = self.state.ok_or(Error::NotReset)?;

        let force = match action {
            CartPoleAction::Left => -FORCE_MAGNITUDE,
            CartPoleAction::Right => FORCE_MAGNITUDE,
        };
        let (sin_theta, cos_theta) = theta.sin_cos();
        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin_theta - cos_theta * temp)
            / (HALF_POLE_LENGTH * (4.0 / 3.0 - MASS_POLE * cos_theta * cos_theta / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos_theta / TOTAL_MASS;

        // Explicit Euler integration
        let state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];
        self.state = Some(state);
        self.elapsed_steps += 1;

        let reward = if self.terminated {
            warn!("stepping a cart pole episode that has already terminated; call reset first");
            0.0
        } else {
            1.0
        };
        self.terminated = self.terminated
            || state[0].abs() > X_THRESHOLD
            || state[2].abs() > THETA_THRESHOLD;

        Ok(Step {
            observation: state,
            reward,
            terminated: self.terminated,
            truncated: self.elapsed_steps >= self.max_episode_steps,
            info: (),
        })
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn test_reset_is_seeded() {
        let mut a = CartPole::new();
        let mut b = CartPole::new();
        let (obs_a, _) = a.reset(Some(333)).unwrap();
        let (obs_b, _) = b.reset(Some(333)).unwrap();
        assert_eq!(obs_a, obs_b);
        assert!(obs_a.iter().all(|v| v.abs() < RESET_BOUND));

        let step_a = a.step(CartPoleAction::Left).unwrap();
        let step_b = b.step(CartPoleAction::Left).unwrap();
        assert_eq!(step_a, step_b);
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = CartPole::new();
        let err = env.step(CartPoleAction::Right).unwrap_err();
        expect!["environment must be reset before it is stepped"].assert_eq(&err.to_string());
    }

    #[test]
    fn test_constant_push_terminates() {
        let mut env = CartPole::new();
        env.reset(Some(0)).unwrap();
        let mut total_reward = 0.0;
        let mut terminated = false;
        for _ in 0..100 {
            let step = env.step(CartPoleAction::Right).unwrap();
            total_reward += step.reward;
            if step.terminated {
                terminated = true;
                break;
            }
        }
        assert!(terminated);
        assert!(total_reward > 0.0);

        let after = env.step(CartPoleAction::Right).unwrap();
        assert!(after.terminated);
        assert_eq!(after.reward, 0.0);
    }

    #[test]
    fn test_time_limit_truncates() {
        let mut env = CartPoleConfig::new().with_max_episode_steps(3).init();
        env.reset(Some(7)).unwrap();
        let first = env.step(CartPoleAction::Left).unwrap();
        let second = env.step(CartPoleAction::Right).unwrap();
        let third = env.step(CartPoleAction::Left).unwrap();
        assert!(!first.truncated && !second.truncated);
        assert!(third.truncated);
        assert!(!third.terminated);
        assert!(third.done());
    }
}
