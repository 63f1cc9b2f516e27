//! In-memory fact store that keeps relationship arrays bidirectional.

use super::context::FactContext;
use super::fact::{push_unique, Fact, FactId, FactRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from fact store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Unknown fact: {0}")]
    UnknownFact(FactId),

    #[error("Fact {0} cannot be related to itself")]
    SelfRelation(FactId),

    #[error("Cannot relate {from} ({from_context}) to {to} ({to_context}) across contexts")]
    ContextMismatch {
        from: FactId,
        from_context: FactContext,
        to: FactId,
        to_context: FactContext,
    },
}

/// Ordered collection of facts.
///
/// Insertion order is preserved because it decides which fact becomes the
/// primary of a stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactStore {
    /// All facts, in insertion order.
    facts: Vec<Fact>,
}

impl FactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing facts, keeping the last fact for duplicate ids.
    pub fn from_facts(facts: impl IntoIterator<Item = Fact>) -> Self {
        let mut store = Self::new();
        for fact in facts {
            store.add_fact(fact);
        }
        store
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check if the store holds no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// All facts, in insertion order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Consume the store and return its facts.
    pub fn into_facts(self) -> Vec<Fact> {
        self.facts
    }

    // =========================================================================
    // Fact Management
    // =========================================================================

    /// Add a fact. A fact with the same id is replaced in place.
    pub fn add_fact(&mut self, fact: Fact) -> FactId {
        let id = fact.id.clone();
        match self.position(&id) {
            Some(index) => self.facts[index] = fact,
            None => self.facts.push(fact),
        }
        id
    }

    /// Create and add a fact with a fresh id.
    pub fn create_fact(&mut self, context: FactContext, statement: impl Into<String>) -> FactId {
        self.add_fact(Fact::new(FactId::new(), context).with_statement(statement))
    }

    /// Get a fact by ID.
    pub fn get(&self, id: &FactId) -> Option<&Fact> {
        self.facts.iter().find(|f| &f.id == id)
    }

    /// Get a mutable fact by ID.
    pub fn get_mut(&mut self, id: &FactId) -> Option<&mut Fact> {
        self.facts.iter_mut().find(|f| &f.id == id)
    }

    /// Check if a fact exists.
    pub fn contains(&self, id: &FactId) -> bool {
        self.position(id).is_some()
    }

    /// Remove a fact and every reference other facts hold to it.
    pub fn remove_fact(&mut self, id: &FactId) -> Option<Fact> {
        let index = self.position(id)?;
        let removed = self.facts.remove(index);
        for fact in &mut self.facts {
            fact.forget(id);
            if fact.basis_id.as_ref() == Some(id) {
                fact.basis_id = None;
            }
        }
        Some(removed)
    }

    /// Snapshot of all facts in one context, in insertion order.
    pub fn facts_in_context(&self, context: FactContext) -> Vec<Fact> {
        self.facts
            .iter()
            .filter(|f| f.context == context)
            .cloned()
            .collect()
    }

    /// Snapshot of the facts of one corpus in one context, in insertion order.
    pub fn facts_in_region(&self, corpus_id: &str, context: FactContext) -> Vec<Fact> {
        self.facts
            .iter()
            .filter(|f| f.context == context && f.corpus_id.as_deref() == Some(corpus_id))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Relationship Management
    // =========================================================================

    /// Link two facts symmetrically through `linkedFacts`.
    pub fn link(&mut self, a: &FactId, b: &FactId) -> Result<(), StoreError> {
        let (a_ref, b_ref) = self.check_pair(a, b)?;
        if let Some(fact) = self.get_mut(a) {
            push_unique(&mut fact.linked_facts, b_ref);
        }
        if let Some(fact) = self.get_mut(b) {
            push_unique(&mut fact.linked_facts, a_ref);
        }
        Ok(())
    }

    /// Record that `supporter` supports `supported`, filling both directions.
    pub fn support(&mut self, supporter: &FactId, supported: &FactId) -> Result<(), StoreError> {
        let (supporter_ref, supported_ref) = self.check_pair(supporter, supported)?;
        if let Some(fact) = self.get_mut(supporter) {
            push_unique(&mut fact.supports, supported_ref);
        }
        if let Some(fact) = self.get_mut(supported) {
            push_unique(&mut fact.supported_by, supporter_ref);
        }
        Ok(())
    }

    /// Remove every link and support relation between two facts.
    pub fn unlink(&mut self, a: &FactId, b: &FactId) -> Result<bool, StoreError> {
        if !self.contains(a) {
            return Err(StoreError::UnknownFact(a.clone()));
        }
        if !self.contains(b) {
            return Err(StoreError::UnknownFact(b.clone()));
        }

        let mut changed = false;
        if let Some(fact) = self.get_mut(a) {
            changed |= fact.forget(b);
        }
        if let Some(fact) = self.get_mut(b) {
            changed |= fact.forget(a);
        }
        Ok(changed)
    }

    /// Record that `child` was derived from `basis`.
    pub fn set_basis(&mut self, child: &FactId, basis: &FactId) -> Result<(), StoreError> {
        if child == basis {
            return Err(StoreError::SelfRelation(child.clone()));
        }
        if !self.contains(basis) {
            return Err(StoreError::UnknownFact(basis.clone()));
        }
        let fact = self
            .get_mut(child)
            .ok_or_else(|| StoreError::UnknownFact(child.clone()))?;
        fact.basis_id = Some(basis.clone());
        Ok(())
    }

    /// Walk basis links upward from a fact, nearest ancestor first.
    ///
    /// Stops at a fact without a basis, a basis missing from the store, or a cycle.
    pub fn basis_chain(&self, id: &FactId) -> Vec<FactId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id.clone());

        let mut current = self.get(id).and_then(|f| f.basis_id.clone());
        while let Some(basis) = current {
            if !seen.insert(basis.clone()) {
                break;
            }
            let Some(fact) = self.get(&basis) else {
                break;
            };
            current = fact.basis_id.clone();
            chain.push(basis);
        }
        chain
    }

    fn position(&self, id: &FactId) -> Option<usize> {
        self.facts.iter().position(|f| &f.id == id)
    }

    /// Validate a relation between two facts and return references to each.
    fn check_pair(
        &self,
        a: &FactId,
        b: &FactId,
    ) -> Result<(FactRef, FactRef), StoreError> {
        if a == b {
            return Err(StoreError::SelfRelation(a.clone()));
        }
        let fa = self.get(a).ok_or_else(|| StoreError::UnknownFact(a.clone()))?;
        let fb = self.get(b).ok_or_else(|| StoreError::UnknownFact(b.clone()))?;
        if fa.context != fb.context {
            return Err(StoreError::ContextMismatch {
                from: a.clone(),
                from_context: fa.context,
                to: b.clone(),
                to_context: fb.context,
            });
        }
        Ok((fa.to_ref(), fb.to_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(ids: &[(&str, FactContext)]) -> FactStore {
        FactStore::from_facts(ids.iter().map(|(id, ctx)| Fact::new(*id, *ctx)))
    }

    #[test]
    fn test_link_is_bidirectional() {
        let mut store = store_with(&[("a", FactContext::Knowledge), ("b", FactContext::Knowledge)]);
        let (a, b) = (FactId::from("a"), FactId::from("b"));

        store.link(&a, &b).unwrap();
        store.link(&b, &a).unwrap();

        assert_eq!(store.get(&a).unwrap().linked_facts.len(), 1);
        assert_eq!(store.get(&b).unwrap().linked_facts.len(), 1);
        assert!(store.get(&b).unwrap().references(&a));
    }

    #[test]
    fn test_support_fills_both_directions() {
        let mut store = store_with(&[("a", FactContext::Builder), ("b", FactContext::Builder)]);
        let (a, b) = (FactId::from("a"), FactId::from("b"));

        store.support(&a, &b).unwrap();

        assert_eq!(store.get(&a).unwrap().supports[0].id, b);
        assert_eq!(store.get(&b).unwrap().supported_by[0].id, a);
    }

    #[test]
    fn test_relation_errors() {
        let mut store = store_with(&[("a", FactContext::Knowledge), ("b", FactContext::Builder)]);
        let (a, b) = (FactId::from("a"), FactId::from("b"));

        assert_eq!(store.link(&a, &a), Err(StoreError::SelfRelation(a.clone())));
        assert!(matches!(
            store.link(&a, &b),
            Err(StoreError::ContextMismatch { .. })
        ));
        assert_eq!(
            store.support(&a, &FactId::from("ghost")),
            Err(StoreError::UnknownFact(FactId::from("ghost")))
        );
    }

    #[test]
    fn test_unlink_and_remove() {
        let mut store = store_with(&[
            ("a", FactContext::Global),
            ("b", FactContext::Global),
            ("c", FactContext::Global),
        ]);
        let (a, b, c) = (FactId::from("a"), FactId::from("b"), FactId::from("c"));
        store.link(&a, &b).unwrap();
        store.support(&a, &c).unwrap();

        assert_eq!(store.unlink(&a, &b), Ok(true));
        assert_eq!(store.unlink(&a, &b), Ok(false));
        assert!(!store.get(&b).unwrap().references(&a));

        let removed = store.remove_fact(&c).unwrap();
        assert_eq!(removed.id, c);
        assert!(!store.get(&a).unwrap().references(&c));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_fact_replaces_same_id() {
        let mut store = store_with(&[("a", FactContext::Global), ("b", FactContext::Global)]);
        store.add_fact(Fact::new("a", FactContext::Global).with_statement("updated"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.facts()[0].statement_text(), "updated");
    }

    #[test]
    fn test_region_snapshots_keep_order() {
        let mut store = FactStore::new();
        store.add_fact(Fact::new("k1", FactContext::Knowledge).with_corpus("c1"));
        store.add_fact(Fact::new("b1", FactContext::Builder).with_corpus("c1"));
        store.add_fact(Fact::new("k2", FactContext::Knowledge).with_corpus("c2"));
        store.add_fact(Fact::new("k3", FactContext::Knowledge).with_corpus("c1"));

        let knowledge: Vec<_> = store
            .facts_in_context(FactContext::Knowledge)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(knowledge, ["k1", "k2", "k3"].map(FactId::from));

        let region = store.facts_in_region("c1", FactContext::Knowledge);
        assert_eq!(region.len(), 2);
        assert_eq!(region[1].id, FactId::from("k3"));
    }

    #[test]
    fn test_basis_chain_stops_on_cycle() {
        let mut store = store_with(&[
            ("root", FactContext::Global),
            ("mid", FactContext::Global),
            ("leaf", FactContext::Knowledge),
        ]);
        let (root, mid, leaf) = (FactId::from("root"), FactId::from("mid"), FactId::from("leaf"));
        store.set_basis(&leaf, &mid).unwrap();
        store.set_basis(&mid, &root).unwrap();

        assert_eq!(store.basis_chain(&leaf), vec![mid.clone(), root.clone()]);

        store.set_basis(&root, &leaf).unwrap();
        assert_eq!(store.basis_chain(&leaf), vec![mid, root]);
    }
}
