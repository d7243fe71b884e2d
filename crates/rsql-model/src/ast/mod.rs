pub mod expr;
pub mod operator;
pub mod selector;

pub use expr::{Expression, Operand};
pub use operator::{ComparisonOperator, LogicOperator};
pub use selector::Selector;
