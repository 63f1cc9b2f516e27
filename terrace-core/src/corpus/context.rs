//! Fact contexts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a context name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown fact context: {0}")]
pub struct ParseContextError(pub String);

/// The region a fact belongs to.
///
/// Contexts never interact: a stack only ever holds facts of one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactContext {
    /// Facts visible across the whole project.
    Global,
    /// Facts authored while building a corpus.
    Builder,
    /// Facts extracted into the knowledge base.
    Knowledge,
}

impl FactContext {
    /// Every context, in display order.
    pub const ALL: [FactContext; 3] = [
        FactContext::Global,
        FactContext::Builder,
        FactContext::Knowledge,
    ];

    /// Get the wire name for this context.
    pub fn name(&self) -> &'static str {
        match self {
            FactContext::Global => "global",
            FactContext::Builder => "builder",
            FactContext::Knowledge => "knowledge",
        }
    }

    /// Get the display title for this context.
    pub fn title(&self) -> &'static str {
        match self {
            FactContext::Global => "Global",
            FactContext::Builder => "Builder",
            FactContext::Knowledge => "Knowledge",
        }
    }

    /// The context after this one, wrapping around.
    pub fn next(&self) -> FactContext {
        match self {
            FactContext::Global => FactContext::Builder,
            FactContext::Builder => FactContext::Knowledge,
            FactContext::Knowledge => FactContext::Global,
        }
    }

    /// The context before this one, wrapping around.
    pub fn previous(&self) -> FactContext {
        match self {
            FactContext::Global => FactContext::Knowledge,
            FactContext::Builder => FactContext::Global,
            FactContext::Knowledge => FactContext::Builder,
        }
    }
}

impl fmt::Display for FactContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FactContext {
    type Err = ParseContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(FactContext::Global),
            "builder" => Ok(FactContext::Builder),
            "knowledge" => Ok(FactContext::Knowledge),
            other => Err(ParseContextError(other.to_string())),
        }
    }
}
