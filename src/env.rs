//! The landing environment.
//!
//! Owns the whole episode loop: spawn sampling, command decoding and
//! latency, actuation, integration, telemetry, reward, and
//! termination. Generic over the [`ActionDecoder`] so the same core
//! serves every control scheme; [`ThrustGimbal`] is the default.
//!
//! The episode contract is strict: [`Lander::step`] after termination
//! is an error, never a silent auto-reset. Terminal observations stay
//! readable until the caller decides to [`Lander::reset`].

use crate::action::{ActionDecoder, ThrustGimbal};
use crate::config::LanderConfig;
use crate::constants::DEFAULT_SPAWN_HEIGHT;
use crate::curriculum::Curriculum;
use crate::error::{LanderError, Result};
use crate::flight_log::{EpisodeSummary, FlightLog, FlightSample};
use crate::observation::{observe, Observation};
use crate::physics::{CommandQueue, Rocket, ThrustVectorControl};
use crate::reward::{step_penalty, terminal_bonus};
use crate::termination::{check_termination, TerminationReason};
use crate::types::UnitVec2;

/// Everything [`Lander::step`] produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// State vector after the step.
    pub observation: Observation,
    /// Reward for this step (terminal bonus included on the final one).
    pub reward: f64,
    /// `Some` exactly once per episode, on the step that ended it.
    pub terminated: Option<TerminationReason>,
}

/// The rocket-landing environment.
///
/// Construction performs the first reset, so a fresh environment is
/// immediately steppable. Curriculum changes made through
/// [`Lander::curriculum_mut`] take effect at the next reset.
#[derive(Clone, Debug)]
pub struct Lander<D: ActionDecoder = ThrustGimbal> {
    config: LanderConfig,
    decoder: D,
    curriculum: Curriculum,
    rng: fastrand::Rng,

    rocket: Rocket,
    tvc: ThrustVectorControl,
    command_queue: CommandQueue,
    flight_log: FlightLog,

    spawn_height: f64,
    elapsed: f64,
    steps: usize,
    total_reward: f64,
    terminated: Option<TerminationReason>,
    summary: Option<EpisodeSummary>,
}

impl<D: ActionDecoder + Default> Lander<D> {
    /// Build and reset an environment from `config`.
    pub fn from_config(config: LanderConfig) -> Result<Self> {
        Self::with_decoder(config, D::default())
    }
}

impl<D: ActionDecoder> Lander<D> {
    /// Build and reset an environment with an explicit decoder value.
    pub fn with_decoder(config: LanderConfig, decoder: D) -> Result<Self> {
        config.validate()?;
        let mut env = Self {
            decoder,
            curriculum: Curriculum::new(),
            rng: fastrand::Rng::with_seed(config.seed),
            rocket: Rocket::new(config.rocket, 0.0, DEFAULT_SPAWN_HEIGHT, UnitVec2::up()),
            tvc: ThrustVectorControl::new(config.tvc, UnitVec2::up()),
            command_queue: CommandQueue::from_delay(config.actuation_delay, config.timestep),
            flight_log: FlightLog::new(),
            spawn_height: DEFAULT_SPAWN_HEIGHT,
            elapsed: 0.0,
            steps: 0,
            total_reward: 0.0,
            terminated: None,
            summary: None,
            config,
        };
        env.reset();
        Ok(env)
    }

    /// Start a new episode: sample spawn conditions from the
    /// curriculum, rebuild the rocket and actuator, flush the command
    /// queue, clear the telemetry, and return the initial observation.
    ///
    /// The previous episode's [`EpisodeSummary`] stays readable.
    pub fn reset(&mut self) -> Observation {
        self.spawn_height = self.curriculum.spawn_height(&mut self.rng);
        let direction = self.curriculum.spawn_direction(&mut self.rng);
        let offset = self.curriculum.spawn_offset(&mut self.rng);

        // Actuator spawns aligned with the body: zero deflection, zero
        // thrust.
        self.rocket = Rocket::new(self.config.rocket, offset, self.spawn_height, direction);
        self.tvc = ThrustVectorControl::new(self.config.tvc, direction);
        self.command_queue.reset();
        self.flight_log.clear();

        self.elapsed = 0.0;
        self.steps = 0;
        self.total_reward = 0.0;
        self.terminated = None;

        self.observation()
    }

    /// Advance one timestep under `action`.
    ///
    /// Fails without touching any state if the action index is out of
    /// range or the episode has already finished.
    pub fn step(&mut self, action: usize) -> Result<StepOutcome> {
        if let Some(reason) = self.terminated {
            return Err(LanderError::EpisodeFinished {
                reason: reason.as_str(),
            });
        }
        let command = self.decoder.decode(action)?;

        // Curriculum gate: until turning is unlocked, only the
        // throttle part of a command reaches the actuator.
        let command = if self.curriculum.turn_enabled() {
            command
        } else {
            command.without_nozzle()
        };
        let command = self.command_queue.exchange(command);

        let dt = self.config.timestep;
        self.tvc.apply_command(command, dt);
        self.rocket.step(&mut self.tvc, dt);

        self.flight_log.push(FlightSample {
            time: self.elapsed,
            position_x: self.rocket.position_x(),
            position_y: self.rocket.position_y(),
            velocity_x: self.rocket.velocity_x(),
            velocity_y: self.rocket.velocity_y(),
            angular_velocity: self.rocket.angular_velocity(),
            rocket_angle: self.rocket.signed_tilt(),
            tvc_angle: self.tvc.level(),
            thrust: self.tvc.thrust(),
        });
        self.elapsed += dt;
        self.steps += 1;

        let mut reward = step_penalty(&self.config.reward, dt);
        let terminated = check_termination(&self.rocket, self.spawn_height);
        if let Some(reason) = terminated {
            reward += terminal_bonus(&self.config.reward, &self.rocket, &self.curriculum, reason);
        }
        self.total_reward += reward;

        if let Some(reason) = terminated {
            self.terminated = Some(reason);
            self.summary = Some(EpisodeSummary {
                steps: self.steps,
                duration: self.elapsed,
                total_reward: self.total_reward,
                outcome: reason,
                final_velocity_x: self.rocket.velocity_x(),
                final_velocity_y: self.rocket.velocity_y(),
                final_position_x: self.rocket.position_x(),
                final_tilt: self.rocket.unsigned_tilt(),
            });
        }

        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            terminated,
        })
    }

    /// The current state vector.
    pub fn observation(&self) -> Observation {
        observe(&self.rocket, self.spawn_height)
    }

    /// Cardinality of the decoder's action space.
    pub fn num_actions(&self) -> usize {
        D::N_ACTIONS
    }

    /// `Some` once the episode has ended.
    #[inline]
    pub fn terminated(&self) -> Option<TerminationReason> {
        self.terminated
    }

    /// Whether the episode has ended.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.terminated.is_some()
    }

    /// Digest of the most recently finished episode, surviving resets
    /// until the next episode finishes.
    #[inline]
    pub fn episode_summary(&self) -> Option<&EpisodeSummary> {
        self.summary.as_ref()
    }

    /// This episode's spawn height (m).
    #[inline]
    pub fn spawn_height(&self) -> f64 {
        self.spawn_height
    }

    /// Steps taken this episode.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Flight time this episode (s).
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Reward accumulated this episode.
    #[inline]
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// The curriculum in force.
    #[inline]
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    /// Mutable curriculum access; changes take effect at the next
    /// reset.
    #[inline]
    pub fn curriculum_mut(&mut self) -> &mut Curriculum {
        &mut self.curriculum
    }

    /// Telemetry for the episode in progress (or just finished).
    #[inline]
    pub fn flight_log(&self) -> &FlightLog {
        &self.flight_log
    }

    /// The rocket body.
    #[inline]
    pub fn rocket(&self) -> &Rocket {
        &self.rocket
    }

    /// The TVC actuator.
    #[inline]
    pub fn tvc(&self) -> &ThrustVectorControl {
        &self.tvc
    }

    /// The configuration this environment was built from.
    #[inline]
    pub fn config(&self) -> &LanderConfig {
        &self.config
    }
}
