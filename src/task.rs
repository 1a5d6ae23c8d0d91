use nalgebra::Vector3;

use crate::env::{Environment, Step};
use crate::error::EnvResult;
use crate::sim::{Physics, Pose, QuadSim};

/// Initial conditions and goal for a hover task. Unset fields fall back
/// to the simulator's own defaults; the goal defaults to (0, 0, 10).
#[derive(Debug, Clone)]
pub struct TaskConfig {
    pub init_pose: Option<Pose>,
    pub init_velocity: Option<Vector3<f64>>,
    pub init_angular_velocity: Option<Vector3<f64>>,
    pub runtime: f64,
    pub target_pos: Option<Vector3<f64>>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            init_pose: None,
            init_velocity: None,
            init_angular_velocity: None,
            runtime: 5.0,
            target_pos: None,
        }
    }
}

/// Task (environment) that defines the goal and provides feedback to the
/// agent.
///
/// Each external action is repeated for `action_repeat` simulator
/// substeps; the per-substep rewards are accumulated and the resulting
/// poses are stacked into one flat observation. Termination before the
/// simulator's time limit is penalized, and the accumulated reward is
/// squashed through a logistic into (0, 1) so downstream value learners
/// see a bounded signal.
pub struct Task<P: Physics = QuadSim> {
    sim: P,
    action_repeat: usize,
    state_size: usize,
    action_low: f64,
    action_high: f64,
    action_size: usize,
    target_pos: Vector3<f64>,
}

impl Task<QuadSim> {
    pub fn new(config: TaskConfig) -> Self {
        let sim = QuadSim::new(
            config.init_pose,
            config.init_velocity,
            config.init_angular_velocity,
            config.runtime,
        );
        Self::with_sim(sim, config.target_pos)
    }
}

impl<P: Physics> Task<P> {
    const ACTION_REPEAT: usize = 3;

    /// Build a task over any simulator. Tests inject a scripted mock
    /// through here.
    pub fn with_sim(sim: P, target_pos: Option<Vector3<f64>>) -> Self {
        Self {
            sim,
            action_repeat: Self::ACTION_REPEAT,
            state_size: Self::ACTION_REPEAT * 6,
            action_low: 0.0,
            action_high: 900.0,
            action_size: 4,
            target_pos: target_pos.unwrap_or_else(|| Vector3::new(0.0, 0.0, 10.0)),
        }
    }

    /// Reward for the simulator's current pose.
    ///
    /// Base term is 1 - (d / 60)^0.4 where d is the L1 distance to the
    /// target and 60 is the sum of the (20, 20, 20) normalization box.
    /// The fractional exponent keeps the curve steep away from the
    /// target and flat near it. A flat +10 bonus rewards being within
    /// one unit of the target altitude regardless of horizontal error.
    pub fn get_reward(&self) -> f64 {
        const BOUNDS_SUM: f64 = 60.0;

        let pose = self.sim.pose();
        let distance = (pose.position - self.target_pos).abs().sum();
        let mut reward = 1.0 - (distance / BOUNDS_SUM).powf(0.4);

        if (pose.position.z - self.target_pos.z).abs() < 1.0 {
            reward += 10.0;
        }

        reward
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn action_size(&self) -> usize {
        self.action_size
    }

    pub fn action_low(&self) -> f64 {
        self.action_low
    }

    pub fn action_high(&self) -> f64 {
        self.action_high
    }

    pub fn target_pos(&self) -> Vector3<f64> {
        self.target_pos
    }
}

impl<P: Physics> Environment for Task<P> {
    type Observation = Vec<f64>;
    type Action = [f64; 4];

    fn reset(&mut self) -> EnvResult<Self::Observation> {
        self.sim.reset();

        let pose = self.sim.pose().to_array();
        let mut state = Vec::with_capacity(self.state_size);
        for _ in 0..self.action_repeat {
            state.extend_from_slice(&pose);
        }
        Ok(state)
    }

    /// One external control step: `action_repeat` simulator substeps
    /// under the same rotor speeds. Rotor speeds are passed through to
    /// the simulator unvalidated. Stepping past a `done` episode keeps
    /// driving the simulator; callers are expected to `reset` instead.
    fn step(&mut self, rotor_speeds: Self::Action) -> EnvResult<Step<Self::Observation>> {
        let mut reward = 0.0;
        let mut next_state = Vec::with_capacity(self.state_size);
        let mut terminal = None;

        for _ in 0..self.action_repeat {
            let update = self.sim.next_timestep(&rotor_speeds);
            reward += self.get_reward();
            next_state.extend_from_slice(&update.pose.to_array());
            terminal = Some((update.done, update.time));
        }
        let (done, elapsed) = terminal.unwrap_or((false, self.sim.time()));

        // Termination before the time limit means the vehicle left the
        // valid region; a time-limit ending is not penalized.
        if done && elapsed < self.sim.runtime() {
            reward -= 200.0;
        }

        // Logistic squash bounds the accumulated reward into (0, 1).
        let reward = 1.0 / (1.0 + (-reward).exp());

        Ok(Step {
            obs: next_state,
            done,
            reward,
            info: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSim;
    use approx::assert_relative_eq;

    fn mock_at(position: [f64; 3]) -> MockSim {
        MockSim::new(
            Pose::from_array([position[0], position[1], position[2], 0.0, 0.0, 0.0]),
            10.0,
        )
    }

    fn squash(reward: f64) -> f64 {
        1.0 / (1.0 + (-reward).exp())
    }

    #[test]
    fn default_target_is_origin_hover_point() {
        let task = Task::new(TaskConfig::default());
        assert_eq!(task.target_pos(), Vector3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn observation_length_is_state_size() {
        let mut task = Task::new(TaskConfig::default());
        let state = task.reset().unwrap();
        assert_eq!(state.len(), task.state_size());
        assert_eq!(task.state_size(), 18);

        let step = task.step([400.0; 4]).unwrap();
        assert_eq!(step.obs.len(), task.state_size());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut task = Task::new(TaskConfig::default());
        let first = task.reset().unwrap();
        let second = task.reset().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reward_decreases_with_distance() {
        // All poses outside the altitude-bonus band.
        let far = [[0.0, 0.0, 5.0], [2.0, 2.0, 5.0], [5.0, 5.0, 2.0], [10.0, 10.0, 0.0]];
        let rewards: Vec<f64> = far
            .iter()
            .map(|p| Task::with_sim(mock_at(*p), None).get_reward())
            .collect();
        for pair in rewards.windows(2) {
            assert!(pair[0] > pair[1], "reward not decreasing: {:?}", rewards);
        }
    }

    #[test]
    fn altitude_bonus_is_a_flat_ten() {
        let inside = Task::with_sim(mock_at([3.0, 0.0, 10.0 - 0.999]), None).get_reward();
        let outside = Task::with_sim(mock_at([3.0, 0.0, 10.0 - 1.001]), None).get_reward();
        // The base-reward shift from moving 0.002 in z is tiny next to
        // the bonus itself.
        assert_relative_eq!(inside - outside, 10.0, epsilon = 0.05);
    }

    #[test]
    fn reward_at_target_includes_bonus() {
        let task = Task::with_sim(mock_at([0.0, 0.0, 10.0]), None);
        assert_relative_eq!(task.get_reward(), 11.0, epsilon = 1e-12);
    }

    #[test]
    fn step_reward_stays_in_unit_interval() {
        let mut task = Task::new(TaskConfig::default());
        task.reset().unwrap();
        for _ in 0..20 {
            let step = task.step([860.0, 400.0, 860.0, 400.0]).unwrap();
            assert!(step.reward > 0.0 && step.reward < 1.0);
        }
    }

    #[test]
    fn pinned_at_target_saturates_reward() {
        // Sim never moves, never terminates: three substeps at +11 each.
        let mut task = Task::with_sim(mock_at([0.0, 0.0, 10.0]), None);
        let step = task.step([0.0; 4]).unwrap();
        assert!(!step.done);
        assert_relative_eq!(step.reward, squash(33.0), epsilon = 1e-15);
        assert!(step.reward > 1.0 - 1e-12);
    }

    #[test]
    fn early_termination_costs_two_hundred() {
        let pose = Pose::from_array([5.0, 5.0, 5.0, 0.0, 0.0, 0.0]);
        let per_substep = Task::with_sim(MockSim::new(pose, 10.0), None).get_reward();

        // done on the third substep, well before the 10 s limit
        let mut early = Task::with_sim(MockSim::new(pose, 10.0).failing_at_step(3), None);
        let early_step = early.step([400.0; 4]).unwrap();
        assert!(early_step.done);
        assert_relative_eq!(
            early_step.reward,
            squash(3.0 * per_substep - 200.0),
            epsilon = 1e-15
        );

        // done because the third substep reaches the time limit exactly
        let mut timed = Task::with_sim(MockSim::new(pose, 3.0 * MockSim::DT), None);
        let timed_step = timed.step([400.0; 4]).unwrap();
        assert!(timed_step.done);
        assert_relative_eq!(timed_step.reward, squash(3.0 * per_substep), epsilon = 1e-15);

        assert!(early_step.reward < timed_step.reward);
    }
}
