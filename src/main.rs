//! Random-policy rollouts of the quadcopter hover task.
//!
//! Runs a small batch of independent tasks under uniformly random rotor
//! commands and logs episode returns. Mostly useful as a smoke test and
//! as a usage example for training-loop authors.

use quadhover::error::EnvResult;
use quadhover::policy::{Policy, RandomPolicy};
use quadhover::task::{Task, TaskConfig};
use quadhover::venv::{DummyVectorEnv, VectorEnv};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> EnvResult<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set subscriber");

    // 1. A batch of independent hover tasks
    let tasks: Vec<Task> = (0..4).map(|_| Task::new(TaskConfig::default())).collect();
    let action_low = tasks[0].action_low();
    let action_high = tasks[0].action_high();
    let mut venv = DummyVectorEnv::new(tasks);

    // 2. Random rotor commands as the stand-in policy
    let mut policy = RandomPolicy::new(action_low, action_high);

    // 3. Rollout
    let mut obs = venv.reset()?;
    let mut returns = vec![0.0; venv.len()];
    let mut lengths = vec![0usize; venv.len()];

    info!(envs = venv.len(), "starting random rollouts");
    for _ in 0..500 {
        let actions = policy.forward(&obs);
        let steps = venv.step(&actions)?;

        for (i, step) in steps.iter().enumerate() {
            returns[i] += step.reward;
            lengths[i] += 1;
            if step.done {
                info!(
                    env = i,
                    steps = lengths[i],
                    episode_return = returns[i],
                    "episode finished"
                );
                returns[i] = 0.0;
                lengths[i] = 0;
            }
        }

        obs = steps.into_iter().map(|step| step.obs).collect();
    }

    Ok(())
}
