use crate::predicate::scalar::Scalar;
use serde::{Deserialize, Serialize};

/// Operator value attached to a single field. The data-access layer
/// interprets each variant as its own native operator; `And` wraps
/// multiple constraints that must all hold for the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Exact equality on the raw text
    Equal(String),
    /// Case-insensitive pattern match with `%` wildcards
    ILike(String),
    /// Field is NULL
    IsNull,
    /// Strictly greater than
    MoreThan(Scalar),
    MoreThanOrEqual(Scalar),
    /// Strictly less than
    LessThan(Scalar),
    LessThanOrEqual(Scalar),
    /// Set membership
    In(Vec<String>),
    /// Negation of the wrapped condition
    Not(Box<Condition>),
    /// Composite: every wrapped condition must hold
    And(Vec<Condition>),
}

impl Condition {
    pub fn negated(self) -> Self {
        Condition::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negated_wraps_condition() {
        let condition = Condition::Equal("17".to_string()).negated();
        assert_eq!(
            condition,
            Condition::Not(Box::new(Condition::Equal("17".to_string())))
        );
    }
}
