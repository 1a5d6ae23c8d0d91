use thiserror::Error;

//Handle illegal inputs
pub type EnvResult<T> = Result<T, EnvError>;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("action count {got} does not match env count {expected}")]
    ActionCountMismatch { expected: usize, got: usize },
}
