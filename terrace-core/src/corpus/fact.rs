//! Fact records as handed over by the persistence layer.

use super::context::FactContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a fact.
///
/// Identifiers are opaque strings; freshly created facts get a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(String);

impl FactId {
    /// Create a new unique fact ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FactId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FactId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A lightweight reference to another fact.
///
/// The persistence layer may embed whole fact objects in relationship arrays;
/// only the id and context are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactRef {
    /// The referenced fact.
    pub id: FactId,
    /// Context of the referenced fact, when the upstream payload included it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<FactContext>,
}

impl FactRef {
    /// Create a reference with a known context.
    pub fn new(id: impl Into<FactId>, context: FactContext) -> Self {
        Self {
            id: id.into(),
            context: Some(context),
        }
    }
}

/// A fact record.
///
/// All relationship arrays default to empty so partially loaded graphs can be
/// deserialized without error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    /// Unique identifier.
    pub id: FactId,
    /// Region this fact belongs to.
    pub context: FactContext,
    /// Human-readable statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// Corpus that owns this fact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_id: Option<String>,
    /// Facts this fact supports.
    #[serde(default)]
    pub supports: Vec<FactRef>,
    /// Facts that support this fact.
    #[serde(default)]
    pub supported_by: Vec<FactRef>,
    /// Facts linked to this fact (symmetric).
    #[serde(default)]
    pub linked_facts: Vec<FactRef>,
    /// Fact in the parent corpus this fact was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis_id: Option<FactId>,
}

impl Fact {
    /// Create a new fact with no statement and no relationships.
    pub fn new(id: impl Into<FactId>, context: FactContext) -> Self {
        Self {
            id: id.into(),
            context,
            statement: None,
            corpus_id: None,
            supports: Vec::new(),
            supported_by: Vec::new(),
            linked_facts: Vec::new(),
            basis_id: None,
        }
    }

    /// Set the statement text.
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    /// Set the owning corpus.
    pub fn with_corpus(mut self, corpus_id: impl Into<String>) -> Self {
        self.corpus_id = Some(corpus_id.into());
        self
    }

    /// Add a linked fact reference.
    pub fn with_link(mut self, other: &Fact) -> Self {
        push_unique(&mut self.linked_facts, other.to_ref());
        self
    }

    /// Add a reference to a fact this one supports.
    pub fn with_supports(mut self, other: &Fact) -> Self {
        push_unique(&mut self.supports, other.to_ref());
        self
    }

    /// Add a reference to a fact supporting this one.
    pub fn with_supported_by(mut self, other: &Fact) -> Self {
        push_unique(&mut self.supported_by, other.to_ref());
        self
    }

    /// Set the basis fact.
    pub fn with_basis(mut self, basis: impl Into<FactId>) -> Self {
        self.basis_id = Some(basis.into());
        self
    }

    /// Get a lightweight reference to this fact.
    pub fn to_ref(&self) -> FactRef {
        FactRef::new(self.id.clone(), self.context)
    }

    /// Statement text, or an empty string.
    pub fn statement_text(&self) -> &str {
        self.statement.as_deref().unwrap_or("")
    }

    /// Check if any relationship array references the given fact.
    pub fn references(&self, id: &FactId) -> bool {
        self.supports
            .iter()
            .chain(&self.supported_by)
            .chain(&self.linked_facts)
            .any(|r| &r.id == id)
    }

    /// Remove every reference to the given fact. Returns true if anything changed.
    pub fn forget(&mut self, id: &FactId) -> bool {
        let before = self.supports.len() + self.supported_by.len() + self.linked_facts.len();
        self.supports.retain(|r| &r.id != id);
        self.supported_by.retain(|r| &r.id != id);
        self.linked_facts.retain(|r| &r.id != id);
        before != self.supports.len() + self.supported_by.len() + self.linked_facts.len()
    }
}

/// Push a reference unless one with the same id is already present.
pub(crate) fn push_unique(refs: &mut Vec<FactRef>, reference: FactRef) {
    if !refs.iter().any(|r| r.id == reference.id) {
        refs.push(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_creation() {
        let fact = Fact::new("a", FactContext::Knowledge).with_statement("Water boils at 100C");

        assert_eq!(fact.id.as_str(), "a");
        assert_eq!(fact.statement_text(), "Water boils at 100C");
        assert!(fact.linked_facts.is_empty());
    }

    #[test]
    fn test_builder_links_are_unique() {
        let b = Fact::new("b", FactContext::Knowledge);
        let a = Fact::new("a", FactContext::Knowledge)
            .with_link(&b)
            .with_link(&b);

        assert_eq!(a.linked_facts.len(), 1);
        assert!(a.references(&b.id));
    }

    #[test]
    fn test_forget_strips_all_arrays() {
        let b = Fact::new("b", FactContext::Builder);
        let mut a = Fact::new("a", FactContext::Builder)
            .with_link(&b)
            .with_supports(&b)
            .with_supported_by(&b);

        assert!(a.forget(&b.id));
        assert!(!a.references(&b.id));
        assert!(!a.forget(&b.id));
    }

    #[test]
    fn test_deserialize_partial_fact() {
        let json = r#"{"id": "a", "context": "knowledge"}"#;
        let fact: Fact = serde_json::from_str(json).unwrap();

        assert_eq!(fact.context, FactContext::Knowledge);
        assert!(fact.supports.is_empty());
        assert!(fact.supported_by.is_empty());
        assert!(fact.linked_facts.is_empty());
    }

    #[test]
    fn test_deserialize_embedded_fact_objects() {
        let json = r#"{
            "id": "a",
            "context": "knowledge",
            "statement": "Primary",
            "linkedFacts": [{"id": "b", "context": "knowledge", "statement": "Other"}],
            "supportedBy": [{"id": "c"}]
        }"#;
        let fact: Fact = serde_json::from_str(json).unwrap();

        assert_eq!(fact.linked_facts, vec![FactRef::new("b", FactContext::Knowledge)]);
        assert_eq!(fact.supported_by[0].id, FactId::from("c"));
        assert_eq!(fact.supported_by[0].context, None);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(FactId::new(), FactId::new());
    }
}
