pub mod compiler;
pub mod error;
pub mod merge;
pub mod normalize;

pub use compiler::{MAX_DEPTH, compile};
pub use error::{AdapterError, Result};
pub use merge::merge;
pub use normalize::normalize;
