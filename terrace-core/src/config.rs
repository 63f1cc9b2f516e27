//! Stacking configuration.

use crate::corpus::{FactContext, ParseContextError, ParseSourceError, RelationSource};
use thiserror::Error;

/// Environment variable selecting the relation source.
pub const RELATION_SOURCE_VAR: &str = "TERRACE_RELATION_SOURCE";

/// Environment variable restricting stacking to one context.
pub const CONTEXT_VAR: &str = "TERRACE_CONTEXT";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid TERRACE_RELATION_SOURCE: {0}")]
    RelationSource(#[from] ParseSourceError),

    #[error("Invalid TERRACE_CONTEXT: {0}")]
    Context(#[from] ParseContextError),
}

/// Configuration for computing stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackConfig {
    /// Which relationship arrays count as links.
    pub relation_source: RelationSource,

    /// Only stack facts of this context. `None` stacks every context.
    pub context: Option<FactContext>,
}

impl StackConfig {
    /// Create a config that reads `linkedFacts` across every context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relation source.
    pub fn with_relation_source(mut self, source: RelationSource) -> Self {
        self.relation_source = source;
        self
    }

    /// Restrict stacking to one context.
    pub fn with_context(mut self, context: FactContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Read the config from `TERRACE_RELATION_SOURCE` and `TERRACE_CONTEXT`.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(value) = lookup(RELATION_SOURCE_VAR).filter(|v| !v.trim().is_empty()) {
            config.relation_source = value.parse()?;
        }
        if let Some(value) = lookup(CONTEXT_VAR).filter(|v| !v.trim().is_empty()) {
            config.context = Some(value.parse()?);
        }

        tracing::debug!(
            relation_source = %config.relation_source,
            context = ?config.context,
            "loaded stack config"
        );
        Ok(config)
    }

    /// Read the config from the environment, falling back to defaults on error.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring invalid stack config");
            Self::default()
        })
    }
}
