pub mod ast;
pub mod predicate;

pub use ast::{ComparisonOperator, Expression, LogicOperator, Operand, Selector};
pub use predicate::{Condition, Entry, Predicate, Scalar};
