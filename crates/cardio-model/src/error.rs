use thiserror::Error;

/// Invalid correction configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("breakpoints for {name} must be finite and strictly ascending: {values:?}")]
    InvalidBreakpoints { name: String, values: Vec<f64> },
    #[error("range for {name} is empty: [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
