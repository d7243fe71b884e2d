use crate::ast::{
    operator::{ComparisonOperator, LogicOperator},
    selector::Selector,
};
use serde::{Deserialize, Serialize};

/// Right-hand side of a comparison: a single scalar or a parenthesized list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Value(String),
    List(Vec<String>),
}

impl Operand {
    pub fn value(value: impl Into<String>) -> Self {
        Operand::Value(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

/// Filter expression tree as produced by the external grammar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Comparison {
        selector: Selector,
        operator: ComparisonOperator,
        operand: Operand,
    },
    Logic {
        operator: LogicOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn comparison(
        selector: impl Into<Selector>,
        operator: ComparisonOperator,
        operand: Operand,
    ) -> Self {
        Expression::Comparison {
            selector: selector.into(),
            operator,
            operand,
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::Logic {
            operator: LogicOperator::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Logic {
            operator: LogicOperator::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
