//! Serializable equation records for saving and sharing graphs.

use serde::{Deserialize, Serialize};

/// A saved equation entry: the raw text plus a user-facing note.
///
/// Records round-trip through JSON unchanged; the equation text is
/// re-parsed on load, so a record made with a newer syntax simply
/// fails at submission rather than at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// The equation exactly as the user typed it.
    pub equation: String,
    /// Free-form description shown alongside the equation.
    #[serde(default)]
    pub description: String,
}

impl GraphRecord {
    /// Build a record from an equation string and a description.
    #[must_use]
    pub fn new(equation: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            equation: equation.into(),
            description: description.into(),
        }
    }
}
