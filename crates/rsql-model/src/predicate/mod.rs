pub mod condition;
pub mod object;
pub mod scalar;

pub use condition::Condition;
pub use object::{Entry, Predicate};
pub use scalar::Scalar;
