use serde::{Deserialize, Serialize};
use std::fmt;

/// Dot-separated field path (e.g., price.amount, roles.permission.name).
/// The last segment names the leaf field; every prior segment names a
/// relation to traverse, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector(String);

impl Selector {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn is_relation(&self) -> bool {
        self.0.contains('.')
    }
}

impl From<&str> for Selector {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Selector {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
