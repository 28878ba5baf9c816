//! Error types for loading, validating and solving set cover instances.

use itertools::Itertools;
use thiserror::Error;

/// Result type for the crate's fallible entry points.
pub type Result<T> = std::result::Result<T, Error>;

/// A malformed token stream. Positions count tokens from 0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at token {position}: expected {expected}")]
    UnexpectedEnd { expected: &'static str, position: usize },

    #[error("invalid token {token:?} at token {position}: expected {expected}")]
    InvalidToken { token: String, expected: &'static str, position: usize },

    #[error("{kind} index {index} at token {position} is out of range 1..={max}")]
    IndexOutOfRange { kind: &'static str, index: u64, max: usize, position: usize },

    #[error("unexpected trailing token {token:?} at token {position}")]
    TrailingToken { token: String, position: usize },

    #[error("{what} {value} at token {position} exceeds the limit of {max}")]
    CountTooLarge { what: &'static str, value: usize, max: usize, position: usize },
}

/// Unrecognized layout or strategy names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown input layout {0:?} (expected \"rows\" or \"cols\")")]
    UnknownLayout(String),

    #[error("unknown strategy {0:?} (expected \"naive\" or \"optimized\")")]
    UnknownStrategy(String),
}

/// Errors raised while building or validating an incidence model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("element {element} is out of range for {n} elements")]
    ElementOutOfRange { element: usize, n: usize },

    #[error("set {set} is out of range for {m} sets")]
    SetOutOfRange { set: usize, m: usize },

    /// Elements are 0-based here; the message prints them 1-based.
    #[error("no set contains element {}", one_based(.elements))]
    Infeasible { elements: Vec<usize> },
}

fn one_based(elements: &[usize]) -> String {
    elements.iter().map(|e| e + 1).join(", ")
}

/// Failures of the greedy loop itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("no usable set left with {covered} of {n} elements covered")]
    NoUsableSet { covered: usize, n: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("cannot cover {n} elements with zero sets")]
    NoSets { n: usize },

    #[error("maximum cost must be at least 1")]
    ZeroMaxCost,

    #[error("density {0} is outside [0, 1]")]
    InvalidDensity(f64),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed input: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("internal consistency failure: {0}")]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_message_is_one_based() {
        let err = ModelError::Infeasible { elements: vec![1, 4] };
        assert_eq!(err.to_string(), "no set contains element 2, 5");
    }

    #[test]
    fn parse_errors_wrap_into_crate_error() {
        let err: Error = ParseError::UnexpectedEnd { expected: "set cost", position: 2 }.into();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(
            err.to_string(),
            "malformed input: unexpected end of input at token 2: expected set cost"
        );
    }

    #[test]
    fn bad_names_are_configuration_errors() {
        let err: Error = ConfigError::UnknownStrategy("2ME".into()).into();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown strategy \"2ME\" (expected \"naive\" or \"optimized\")"
        );
    }
}
