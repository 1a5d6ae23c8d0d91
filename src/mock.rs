use nalgebra::Vector3;

use crate::sim::{Physics, Pose, SimUpdate};

/// Scripted simulator for testing tasks without real physics.
///
/// The pose never moves; time advances by a coarse fixed step and the
/// episode ends at the time limit, or earlier at a scripted substep
/// count.
#[derive(Debug, Clone)]
pub struct MockSim {
    pose: Pose,
    velocity: Vector3<f64>,
    count: usize,
    runtime: f64,
    fail_at_step: Option<usize>,
}

impl MockSim {
    pub const DT: f64 = 1.0;

    pub fn new(pose: Pose, runtime: f64) -> Self {
        Self {
            pose,
            velocity: Vector3::zeros(),
            count: 0,
            runtime,
            fail_at_step: None,
        }
    }

    /// Script an early termination at the given substep count.
    pub fn failing_at_step(mut self, step: usize) -> Self {
        self.fail_at_step = Some(step);
        self
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

impl Physics for MockSim {
    fn next_timestep(&mut self, _rotor_speeds: &[f64; 4]) -> SimUpdate {
        self.count += 1;
        let time = self.count as f64 * Self::DT;
        let done = time >= self.runtime || self.fail_at_step.is_some_and(|s| self.count >= s);

        SimUpdate {
            pose: self.pose,
            velocity: self.velocity,
            time,
            done,
        }
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    fn time(&self) -> f64 {
        self.count as f64 * Self::DT
    }

    fn runtime(&self) -> f64 {
        self.runtime
    }
}
