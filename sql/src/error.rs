use thiserror::Error;

/// Configuration errors raised while assembling a condition tree.
///
/// These fail at construction time. Generation itself is infallible: a
/// well-formed tree always lowers to text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConditionError {
    #[error("{connective} requires at least two conditions, got {got}")]
    TooFewConditions { connective: &'static str, got: usize },
}
