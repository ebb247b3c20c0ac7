use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("Invalid diff limit: {0} must be greater than zero")]
    ZeroLimit(&'static str),
}
