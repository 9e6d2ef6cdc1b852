use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset type tag scoping a fetch (e.g., SPOT, MARGIN)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetType(String);

impl AssetType {
    pub fn new(tag: impl Into<String>) -> Self {
        AssetType(tag.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Well-known asset types
impl AssetType {
    pub fn spot() -> Self {
        AssetType::new("SPOT")
    }

    pub fn margin() -> Self {
        AssetType::new("MARGIN")
    }

    pub fn futures() -> Self {
        AssetType::new("FUTURES")
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetType {
    fn from(s: &str) -> Self {
        AssetType::new(s)
    }
}

impl From<String> for AssetType {
    fn from(s: String) -> Self {
        AssetType::new(s)
    }
}
