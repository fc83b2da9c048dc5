//! Batched training adapter.
//!
//! A [`LanderPool`] runs many independent environments for vectorized
//! policy rollouts. Independence is literal: separate RNG streams
//! (seeded `config.seed + index`), separate curricula, separate
//! flight logs. The pool never auto-resets: a finished environment
//! blocks the next batched step until [`LanderPool::reset_finished`]
//! is called, so terminal states cannot be consumed twice or skipped.
//!
//! Batched steps are checked up front (batch length, finished
//! environments, action bounds) before any environment advances, so a
//! failed call leaves every environment untouched.

use crate::action::{ActionDecoder, ThrustGimbal};
use crate::config::LanderConfig;
use crate::env::{Lander, StepOutcome};
use crate::error::{LanderError, Result};
use crate::observation::{Observation, OBSERVATION_SIZE};

/// A fixed-size batch of independent environments.
#[derive(Clone, Debug)]
pub struct LanderPool<D: ActionDecoder = ThrustGimbal> {
    envs: Vec<Lander<D>>,
}

impl<D: ActionDecoder + Default> LanderPool<D> {
    /// Build `num_envs` environments from `config`, seeding each with
    /// `config.seed + index` so their episode sequencing decorrelates.
    pub fn from_config(config: LanderConfig, num_envs: usize) -> Result<Self> {
        if num_envs == 0 {
            return Err(LanderError::Configuration(
                "pool needs at least one environment".into(),
            ));
        }
        let mut envs = Vec::with_capacity(num_envs);
        for index in 0..num_envs {
            let seed = config.seed.wrapping_add(index as u64);
            envs.push(Lander::from_config(config.with_seed(seed))?);
        }
        Ok(Self { envs })
    }
}

impl<D: ActionDecoder> LanderPool<D> {
    /// Number of environments in the pool.
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    /// Always false; pools are constructed non-empty.
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    /// Step every environment with its matching action.
    ///
    /// Fails before advancing anything if the batch length is wrong,
    /// any environment has already finished, or any action index is
    /// out of range.
    pub fn step(&mut self, actions: &[usize]) -> Result<Vec<StepOutcome>> {
        if actions.len() != self.envs.len() {
            return Err(LanderError::SizeMismatch {
                expected: self.envs.len(),
                got: actions.len(),
            });
        }
        for env in &self.envs {
            if let Some(reason) = env.terminated() {
                return Err(LanderError::EpisodeFinished {
                    reason: reason.as_str(),
                });
            }
        }
        for &action in actions {
            if action >= D::N_ACTIONS {
                return Err(LanderError::InvalidAction {
                    action,
                    num_actions: D::N_ACTIONS,
                    decoder: D::NAME,
                });
            }
        }

        let mut outcomes = Vec::with_capacity(self.envs.len());
        for (env, &action) in self.envs.iter_mut().zip(actions) {
            outcomes.push(env.step(action)?);
        }
        Ok(outcomes)
    }

    /// Reset every environment, returning the initial observations.
    pub fn reset_all(&mut self) -> Vec<Observation> {
        self.envs.iter_mut().map(|env| env.reset()).collect()
    }

    /// Reset only the finished environments, returning `(index,
    /// initial observation)` for each one restarted.
    pub fn reset_finished(&mut self) -> Vec<(usize, Observation)> {
        self.envs
            .iter_mut()
            .enumerate()
            .filter(|(_, env)| env.is_finished())
            .map(|(index, env)| (index, env.reset()))
            .collect()
    }

    /// Current observations of every environment.
    pub fn observations(&self) -> Vec<Observation> {
        self.envs.iter().map(|env| env.observation()).collect()
    }

    /// Write all observations into a flat buffer of length
    /// `len() * OBSERVATION_SIZE`, environment-major.
    pub fn write_observations(&self, buffer: &mut [f32]) -> Result<()> {
        let expected = self.envs.len() * OBSERVATION_SIZE;
        if buffer.len() != expected {
            return Err(LanderError::SizeMismatch {
                expected,
                got: buffer.len(),
            });
        }
        for (chunk, env) in buffer.chunks_exact_mut(OBSERVATION_SIZE).zip(&self.envs) {
            chunk.copy_from_slice(&env.observation());
        }
        Ok(())
    }

    /// The environments, in index order.
    pub fn envs(&self) -> &[Lander<D>] {
        &self.envs
    }

    /// Mutable access to one environment (curriculum tweaks, exports).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Lander<D>> {
        self.envs.get_mut(index)
    }

    /// Mutable iteration, e.g. to apply a curriculum change pool-wide.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Lander<D>> {
        self.envs.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> LanderPool {
        LanderPool::from_config(LanderConfig::default().with_seed(11), n).unwrap()
    }

    #[test]
    fn test_pool_needs_at_least_one_env() {
        assert!(LanderPool::<ThrustGimbal>::from_config(LanderConfig::default(), 0).is_err());
    }

    #[test]
    fn test_batch_length_checked() {
        let mut pool = pool(4);
        let err = pool.step(&[4, 4, 4]).unwrap_err();
        assert!(matches!(
            err,
            LanderError::SizeMismatch {
                expected: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn test_bad_action_rejected_before_any_step() {
        let mut pool = pool(3);
        let before = pool.observations();
        assert!(pool.step(&[4, 99, 4]).is_err());
        assert_eq!(pool.observations(), before);
        assert!(pool.envs().iter().all(|env| env.steps() == 0));
    }

    #[test]
    fn test_step_advances_every_env() {
        let mut pool = pool(4);
        let outcomes = pool.step(&[4, 4, 4, 4]).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert!(pool.envs().iter().all(|env| env.steps() == 1));
    }

    #[test]
    fn test_envs_decorrelate_with_random_heights() {
        let mut pool = pool(8);
        for env in pool.iter_mut() {
            env.curriculum_mut().set_random_height(2.0, 9.0).unwrap();
        }
        pool.reset_all();
        let heights: Vec<f64> = pool.envs().iter().map(|env| env.spawn_height()).collect();
        let first = heights[0];
        assert!(heights.iter().any(|h| (h - first).abs() > 1e-9));
    }

    #[test]
    fn test_identical_pools_stay_in_lockstep() {
        let mut a = pool(3);
        let mut b = pool(3);
        for env in a.iter_mut().chain(b.iter_mut()) {
            env.curriculum_mut().set_random_height(1.0, 9.0).unwrap();
            env.curriculum_mut().enable_random_starting_tilt();
        }
        assert_eq!(a.reset_all(), b.reset_all());

        // Mirror the finished-episode handling too, so lockstep holds
        // across episode boundaries, not just within one episode.
        for step in 0..300 {
            match (a.step(&[4, 5, 3]), b.step(&[4, 5, 3])) {
                (Ok(oa), Ok(ob)) => assert_eq!(oa, ob, "pools diverged at step {step}"),
                (Err(ea), Err(eb)) => {
                    assert_eq!(ea, eb);
                    assert_eq!(a.reset_finished(), b.reset_finished());
                }
                _ => panic!("one pool finished before the other at step {step}"),
            }
        }
    }

    #[test]
    fn test_finished_env_blocks_batch_until_reset() {
        let mut pool = pool(2);
        // Drive env 0 into the ground with engines off; env 1 too, they
        // share the spawn height. Default spawn is 1 m up, so free fall
        // lands within a second.
        let mut finished = false;
        for _ in 0..100 {
            match pool.step(&[0, 0]) {
                Ok(outcomes) => {
                    if outcomes.iter().any(|o| o.terminated.is_some()) {
                        finished = true;
                        break;
                    }
                }
                Err(e) => panic!("unexpected error before termination: {e}"),
            }
        }
        assert!(finished);

        let err = pool.step(&[0, 0]).unwrap_err();
        assert!(matches!(err, LanderError::EpisodeFinished { .. }));

        let restarted = pool.reset_finished();
        assert!(!restarted.is_empty());
        assert!(pool.step(&[0, 0]).is_ok());
    }

    #[test]
    fn test_write_observations_layout() {
        let pool = pool(3);
        let mut buffer = vec![0.0f32; 3 * OBSERVATION_SIZE];
        pool.write_observations(&mut buffer).unwrap();

        let observations = pool.observations();
        for (index, obs) in observations.iter().enumerate() {
            let chunk = &buffer[index * OBSERVATION_SIZE..(index + 1) * OBSERVATION_SIZE];
            assert_eq!(chunk, obs);
        }

        let mut wrong = vec![0.0f32; 5];
        assert!(pool.write_observations(&mut wrong).is_err());
    }
}
