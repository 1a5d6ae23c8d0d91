use std::f64::consts::TAU;

use nalgebra::{Rotation3, Vector3};

/// Rigid-body state of the vehicle: 3D position plus Euler angles
/// (roll, pitch, yaw).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: Vector3<f64>,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: Vector3<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_array(pose: [f64; 6]) -> Self {
        Self {
            position: Vector3::new(pose[0], pose[1], pose[2]),
            orientation: Vector3::new(pose[3], pose[4], pose[5]),
        }
    }

    /// Flat (x, y, z, roll, pitch, yaw) form, the order observations use.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
        ]
    }
}

/// Everything a controller needs to know after one simulator timestep.
/// Returned explicitly so callers never have to read state back out of
/// the simulator mid-step.
#[derive(Debug, Clone, Copy)]
pub struct SimUpdate {
    pub pose: Pose,
    pub velocity: Vector3<f64>,
    pub time: f64,
    pub done: bool,
}

/// Minimal simulator capability interface. `QuadSim` is the real
/// implementation; tests drive tasks through `MockSim` instead.
pub trait Physics {
    /// Advance one internal timestep under the given rotor commands.
    fn next_timestep(&mut self, rotor_speeds: &[f64; 4]) -> SimUpdate;

    /// Restore pose, velocities and time to their construction values.
    fn reset(&mut self);

    fn pose(&self) -> Pose;
    fn velocity(&self) -> Vector3<f64>;
    fn time(&self) -> f64;
    fn runtime(&self) -> f64;
}

/// Simplified quadcopter rigid-body simulator.
///
/// Each rotor produces thrust proportional to the square of its commanded
/// speed, directed along the body z axis. Opposing rotor pairs generate
/// roll and pitch torques, alternating spin directions generate yaw
/// torque. Integration is semi-implicit Euler at 50 Hz. The episode ends
/// when elapsed time reaches `runtime` or the vehicle leaves the world
/// box (|x|, |y| <= 150, 0 <= z <= 300).
pub struct QuadSim {
    init_pose: Pose,
    init_velocity: Vector3<f64>,
    init_angular_velocity: Vector3<f64>,

    pose: Pose,
    velocity: Vector3<f64>,
    angular_velocity: Vector3<f64>,
    time: f64,
    runtime: f64,
}

impl QuadSim {
    pub const DT: f64 = 1.0 / 50.0;

    pub const MASS: f64 = 0.958;
    pub const GRAVITY: f64 = 9.81;
    /// Thrust per rotor in N at commanded speed w is K_THRUST * w^2.
    pub const K_THRUST: f64 = 1.44e-5;

    pub fn new(
        init_pose: Option<Pose>,
        init_velocity: Option<Vector3<f64>>,
        init_angular_velocity: Option<Vector3<f64>>,
        runtime: f64,
    ) -> Self {
        let init_pose = init_pose
            .unwrap_or_else(|| Pose::from_array([0.0, 0.0, 10.0, 0.0, 0.0, 0.0]));
        let init_velocity = init_velocity.unwrap_or_else(Vector3::zeros);
        let init_angular_velocity = init_angular_velocity.unwrap_or_else(Vector3::zeros);

        Self {
            init_pose,
            init_velocity,
            init_angular_velocity,
            pose: init_pose,
            velocity: init_velocity,
            angular_velocity: init_angular_velocity,
            time: 0.0,
            runtime,
        }
    }

    /// Commanded speed at which four equal rotors exactly cancel gravity.
    pub fn hover_speed() -> f64 {
        (Self::MASS * Self::GRAVITY / (4.0 * Self::K_THRUST)).sqrt()
    }

    fn out_of_bounds(&self) -> bool {
        let p = self.pose.position;
        p.x.abs() > 150.0 || p.y.abs() > 150.0 || p.z < 0.0 || p.z > 300.0
    }
}

impl Physics for QuadSim {
    fn next_timestep(&mut self, rotor_speeds: &[f64; 4]) -> SimUpdate {
        // Rotor geometry and aero constants
        const ARM_LENGTH: f64 = 0.175;
        const K_YAW: f64 = 2.0e-7;
        const LINEAR_DRAG: f64 = 0.3;
        const ANGULAR_DRAG: f64 = 0.05;
        const INERTIA: [f64; 3] = [0.0347563, 0.0458929, 0.0977];

        let thrusts = rotor_speeds.map(|w| Self::K_THRUST * w * w);
        let total_thrust: f64 = thrusts.iter().sum();

        // Plus configuration: rotors 0/2 on the pitch axis, 1/3 on the
        // roll axis, alternating spin directions for yaw.
        let torque = Vector3::new(
            ARM_LENGTH * (thrusts[3] - thrusts[1]),
            ARM_LENGTH * (thrusts[0] - thrusts[2]),
            K_YAW
                * (rotor_speeds[0] * rotor_speeds[0] - rotor_speeds[1] * rotor_speeds[1]
                    + rotor_speeds[2] * rotor_speeds[2]
                    - rotor_speeds[3] * rotor_speeds[3]),
        ) - ANGULAR_DRAG * self.angular_velocity;

        let o = self.pose.orientation;
        let body_to_world = Rotation3::from_euler_angles(o.x, o.y, o.z);
        let thrust_world = body_to_world * Vector3::new(0.0, 0.0, total_thrust);

        let accel = thrust_world / Self::MASS
            - Vector3::new(0.0, 0.0, Self::GRAVITY)
            - LINEAR_DRAG * self.velocity / Self::MASS;

        let inertia = Vector3::from(INERTIA);
        let angular_accel = torque.component_div(&inertia);

        // Semi-implicit Euler
        self.velocity += accel * Self::DT;
        self.pose.position += self.velocity * Self::DT;
        self.angular_velocity += angular_accel * Self::DT;
        self.pose.orientation =
            (self.pose.orientation + self.angular_velocity * Self::DT).map(|a| a.rem_euclid(TAU));

        self.time += Self::DT;
        let done = self.time >= self.runtime || self.out_of_bounds();

        SimUpdate {
            pose: self.pose,
            velocity: self.velocity,
            time: self.time,
            done,
        }
    }

    fn reset(&mut self) {
        self.pose = self.init_pose;
        self.velocity = self.init_velocity;
        self.angular_velocity = self.init_angular_velocity;
        self.time = 0.0;
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn runtime(&self) -> f64 {
        self.runtime
    }
}
