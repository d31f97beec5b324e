//! Category labels and the analysis result record.

use std::fmt;

use serde::{Serialize, Serializer};

/// Classification assigned to an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Needs an action or specific information.
    Productive,
    /// Courtesy or informal message, no action required.
    Unproductive,
    /// A label outside the known set (only when unknown labels are allowed).
    Other(String),
}

impl Category {
    /// Categories offered to the classifier as candidate labels.
    pub const KNOWN: [Category; 2] = [Category::Productive, Category::Unproductive];

    /// Label exchanged with the classifier and returned to clients.
    pub fn label(&self) -> &str {
        match self {
            Self::Other(label) => label,
            known => known.known_label().unwrap_or_default(),
        }
    }

    /// Fixed label of a known category; `None` for `Other`.
    fn known_label(&self) -> Option<&'static str> {
        match self {
            Self::Productive => Some("Produtivo"),
            Self::Unproductive => Some("Improdutivo"),
            Self::Other(_) => None,
        }
    }

    /// Parse a known label; `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::KNOWN.into_iter().find(|c| c.label() == label)
    }

    /// Candidate labels in classifier order, taken from [`Category::KNOWN`].
    pub fn candidate_labels() -> Vec<&'static str> {
        Self::KNOWN.iter().filter_map(Self::known_label).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Outcome of analyzing one email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub category: Category,
    /// Suggested reply text.
    #[serde(rename = "details")]
    pub suggestion: String,
}
