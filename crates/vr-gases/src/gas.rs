//! Gas definition.

use core::fmt;
use serde::{Deserialize, Serialize};

/// A named gas known to the panel.
///
/// Identity is the index: two `Gas` values with the same index are the same
/// gas even if one of them was built with a different spelling of the name.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Gas {
    index: u32,
    name: String,
}

impl Gas {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Gas {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl core::hash::Hash for Gas {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.index)
    }
}
