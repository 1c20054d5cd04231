use tracing::debug;

use crate::{environment::Environment, Result};

/// Total reward of one episode of `policy`, starting from a reset with `seed`.
pub fn evaluate_episode<E, P>(env: &mut E, policy: &mut P, seed: u64) -> Result<f64>
where
    E: Environment,
    P: FnMut(&E::Observation) -> E::Action,
{
    let mut episode_reward = 0.0;
    let mut steps = 0usize;
    let (mut before, _) = env.reset(Some(seed))?;
    loop {
        let action = policy(&before);
        let step = env.step(action)?;
        episode_reward += step.reward;
        steps += 1;
        if step.done() {
            break;
        }
        before = step.observation;
    }
    debug!(seed, steps, episode_reward, "episode finished");
    Ok(episode_reward)
}
