use std::fmt::Debug;

use crate::env::{Environment, Step};
use crate::error::{EnvError, EnvResult};

pub trait VectorEnv {
    type Observation: Clone + Debug;
    type Action: Clone + Debug;

    fn step(&mut self, actions: &[Self::Action]) -> EnvResult<Vec<Step<Self::Observation>>>;
    fn reset(&mut self) -> EnvResult<Vec<Self::Observation>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serial batch of independent environments. Each env owns its own
/// simulator; nothing is shared across the batch.
pub struct DummyVectorEnv<E: Environment> {
    envs: Vec<E>,
}

impl<E: Environment> DummyVectorEnv<E> {
    pub fn new(envs: Vec<E>) -> Self {
        Self { envs }
    }
}

impl<E: Environment> VectorEnv for DummyVectorEnv<E>
where
    E::Observation: Clone + Debug,
    E::Action: Clone + Debug,
{
    type Observation = E::Observation;
    type Action = E::Action;

    fn step(&mut self, actions: &[Self::Action]) -> EnvResult<Vec<Step<Self::Observation>>> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::ActionCountMismatch {
                expected: self.envs.len(),
                got: actions.len(),
            });
        }

        let mut next_steps = Vec::with_capacity(self.envs.len());

        for (env, action) in self.envs.iter_mut().zip(actions) {
            let mut step = env.step(action.clone())?;

            if step.done {
                // Auto-reset: the returned observation is the fresh
                // episode's first state, with done still marking the
                // boundary.
                step.obs = env.reset()?;
            }
            next_steps.push(step);
        }

        Ok(next_steps)
    }

    fn reset(&mut self) -> EnvResult<Vec<Self::Observation>> {
        let mut obs_vec = Vec::with_capacity(self.envs.len());
        for env in self.envs.iter_mut() {
            obs_vec.push(env.reset()?);
        }
        Ok(obs_vec)
    }

    fn len(&self) -> usize {
        self.envs.len()
    }
}
