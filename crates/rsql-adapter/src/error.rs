use rsql_model::ComparisonOperator;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AdapterError {
    #[error("Empty selector in comparison")]
    EmptySelector,

    #[error("Empty segment in selector '{selector}'")]
    EmptySelectorSegment { selector: String },

    #[error("Operator '{operator}' expects a single value, got a list")]
    ScalarOperandExpected { operator: ComparisonOperator },

    #[error("Expression tree exceeds maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, AdapterError>;
