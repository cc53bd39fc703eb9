//! Store Context Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two physically distinct retail locations.
///
/// Both locations present the same taxonomy but keep their own inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreContext {
    Primary,
    Secondary,
}

impl StoreContext {
    pub const ALL: [StoreContext; 2] = [StoreContext::Primary, StoreContext::Secondary];

    /// The other store context
    pub fn sibling(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for StoreContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(format!("unknown store context: {other}")),
        }
    }
}
