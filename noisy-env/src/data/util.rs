use crate::{environment::Environment, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Transition<O, A> {
    pub before: O,
    pub action: A,
    pub after: O,
    pub reward: f64,
    pub done: bool,
}

/// Rolls `policy` through `env` for `n_steps`, resetting whenever an episode ends.
///
/// Starts from `observation` when given, otherwise from a fresh reset.
pub fn collect_multiple<E, P>(
    env: &mut E,
    observation: Option<E::Observation>,
    policy: &mut P,
    n_steps: usize,
) -> Result<Vec<Transition<E::Observation, E::Action>>>
where
    E: Environment,
    E::Observation: Clone,
    P: FnMut(&E::Observation) -> E::Action,
{
    let mut before = match observation {
        Some(observation) => observation,
        None => env.reset(None)?.0,
    };
    let mut result = Vec::with_capacity(n_steps);
    for _ in 0..n_steps {
        let action = policy(&before);
        let step = env.step(action.clone())?;
        let done = step.done();
        result.push(Transition {
            before,
            action,
            after: step.observation.clone(),
            reward: step.reward,
            done,
        });
        before = match done {
            true => env.reset(None)?.0,
            false => step.observation,
        };
    }
    Ok(result)
}

pub fn collect_single<E, P>(
    env: &mut E,
    observation: Option<E::Observation>,
    policy: &mut P,
) -> Result<Transition<E::Observation, E::Action>>
where
    E: Environment,
    E::Observation: Clone,
    P: FnMut(&E::Observation) -> E::Action,
{
    let mut transitions = collect_multiple(env, observation, policy, 1)?;
    Ok(transitions.remove(0))
}
