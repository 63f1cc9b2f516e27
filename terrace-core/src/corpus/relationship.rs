//! Which relationship arrays count as links when grouping facts.

use super::fact::{Fact, FactRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a relation source name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown relation source: {0} (expected linked, support-pair or combined)")]
pub struct ParseSourceError(pub String);

/// The relationship arrays treated as authoritative.
///
/// Every source is read as a symmetric relation; references appearing in more
/// than one array are deduplicated by the stack builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationSource {
    /// The unified `linkedFacts` array.
    Linked,
    /// `supports` followed by `supportedBy`.
    SupportPair,
    /// `linkedFacts`, then `supports`, then `supportedBy`.
    #[default]
    Combined,
}

impl RelationSource {
    /// Every relation source.
    pub const ALL: [RelationSource; 3] = [
        RelationSource::Linked,
        RelationSource::SupportPair,
        RelationSource::Combined,
    ];

    /// Get the configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            RelationSource::Linked => "linked",
            RelationSource::SupportPair => "support-pair",
            RelationSource::Combined => "combined",
        }
    }

    /// The source after this one, wrapping around.
    pub fn next(&self) -> RelationSource {
        match self {
            RelationSource::Linked => RelationSource::SupportPair,
            RelationSource::SupportPair => RelationSource::Combined,
            RelationSource::Combined => RelationSource::Linked,
        }
    }

    /// Iterate the references of a fact in discovery order.
    pub fn references<'a>(&self, fact: &'a Fact) -> impl Iterator<Item = &'a FactRef> + 'a {
        const NONE: &[FactRef] = &[];
        let (linked, supports, supported_by) = match self {
            RelationSource::Linked => (fact.linked_facts.as_slice(), NONE, NONE),
            RelationSource::SupportPair => {
                (NONE, fact.supports.as_slice(), fact.supported_by.as_slice())
            }
            RelationSource::Combined => (
                fact.linked_facts.as_slice(),
                fact.supports.as_slice(),
                fact.supported_by.as_slice(),
            ),
        };
        linked.iter().chain(supports).chain(supported_by)
    }
}

impl fmt::Display for RelationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelationSource {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linked" | "linked-facts" | "linkedfacts" => Ok(RelationSource::Linked),
            "support-pair" | "support_pair" | "supports" => Ok(RelationSource::SupportPair),
            "combined" | "all" => Ok(RelationSource::Combined),
            other => Err(ParseSourceError(other.to_string())),
        }
    }
}
