use std::collections::HashMap;

use crate::error::EnvResult;

//Step struct returns the outcome of one environment transition
#[derive(Debug)]
pub struct Step<O> {
    pub obs: O,
    pub done: bool,
    pub reward: f64,
    pub info: Option<HashMap<String, String>>,
}

pub trait Environment {
    type Observation;
    type Action;

    fn reset(&mut self) -> EnvResult<Self::Observation>;
    fn step(&mut self, action: Self::Action) -> EnvResult<Step<Self::Observation>>;
}
