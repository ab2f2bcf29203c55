use thiserror::Error;

pub type EcResult<T> = Result<T, EcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what} (value={value})")]
    InvalidArg { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
