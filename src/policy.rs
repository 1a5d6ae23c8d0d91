use rand::Rng;

pub trait Policy {
    type Observation;
    type Action;

    fn forward(&mut self, obs: &[Self::Observation]) -> Vec<Self::Action>;
}

/// Uniform random rotor commands within the task's action bounds.
pub struct RandomPolicy {
    low: f64,
    high: f64,
}

impl RandomPolicy {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Policy for RandomPolicy {
    type Observation = Vec<f64>;
    type Action = [f64; 4];

    fn forward(&mut self, obs: &[Self::Observation]) -> Vec<Self::Action> {
        let mut rng = rand::thread_rng();
        let mut actions = Vec::with_capacity(obs.len());
        for _ in 0..obs.len() {
            actions.push([
                rng.gen_range(self.low..=self.high),
                rng.gen_range(self.low..=self.high),
                rng.gen_range(self.low..=self.high),
                rng.gen_range(self.low..=self.high),
            ]);
        }
        actions
    }
}
