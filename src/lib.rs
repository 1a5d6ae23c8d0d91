pub mod env;
pub mod error;
pub mod mock;
pub mod policy;
pub mod sim;
pub mod task;
pub mod venv;

pub use env::{Environment, Step};
pub use error::{EnvError, EnvResult};
pub use sim::{Physics, Pose, QuadSim, SimUpdate};
pub use task::{Task, TaskConfig};
