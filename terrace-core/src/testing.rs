//! Fixtures and invariant checks for stack tests.
//!
//! This module provides:
//! - `sample_store` for a small corpus with links in every context
//! - `FactGraph` for building fact lists with relationships by id
//! - Assertion helpers for the stack invariants

use crate::corpus::{Fact, FactContext, FactId, FactRef, FactStore};
use crate::stack::FactStack;
use std::collections::HashMap;

/// Builds an ordered fact list from ids and relations.
///
/// Relations are recorded on both ends, the way the persistence layer stores them.
#[derive(Debug, Default)]
pub struct FactGraph {
    facts: Vec<Fact>,
}

impl FactGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fact.
    pub fn fact(mut self, id: &str, context: FactContext) -> Self {
        self.facts.push(Fact::new(id, context).with_statement(format!("Fact {id}")));
        self
    }

    /// Link two facts through `linkedFacts` on both ends.
    pub fn link(mut self, a: &str, b: &str) -> Self {
        let (a_ref, b_ref) = (self.get(a).to_ref(), self.get(b).to_ref());
        self.get_mut(a).linked_facts.push(b_ref);
        self.get_mut(b).linked_facts.push(a_ref);
        self
    }

    /// Record that `a` supports `b`, on both ends.
    pub fn support(mut self, a: &str, b: &str) -> Self {
        let (a_ref, b_ref) = (self.get(a).to_ref(), self.get(b).to_ref());
        self.get_mut(a).supports.push(b_ref);
        self.get_mut(b).supported_by.push(a_ref);
        self
    }

    /// Finish building.
    pub fn build(self) -> Vec<Fact> {
        self.facts
    }

    fn get(&self, id: &str) -> &Fact {
        self.facts
            .iter()
            .find(|f| f.id.as_str() == id)
            .unwrap_or_else(|| panic!("no fact {id} in graph"))
    }

    fn get_mut(&mut self, id: &str) -> &mut Fact {
        self.facts
            .iter_mut()
            .find(|f| f.id.as_str() == id)
            .unwrap_or_else(|| panic!("no fact {id} in graph"))
    }
}

/// A small corpus with facts in every context.
///
/// Knowledge facts form one stack of three and two lone facts. Builder facts
/// are related through a support relation, and the global fact carries a stray
/// link into the knowledge context.
pub fn sample_store() -> FactStore {
    let mut store = FactStore::new();
    let entries = [
        ("k-water", FactContext::Knowledge, "Water boils at 100C at sea level"),
        ("k-pressure", FactContext::Knowledge, "Boiling point falls with air pressure"),
        ("k-altitude", FactContext::Knowledge, "Air pressure falls with altitude"),
        ("k-salt", FactContext::Knowledge, "Salt raises the boiling point"),
        ("k-ice", FactContext::Knowledge, "Ice is less dense than water"),
        ("b-draft", FactContext::Builder, "Draft: cooking times vary by altitude"),
        ("b-source", FactContext::Builder, "Source: high-altitude baking guide"),
        ("g-units", FactContext::Global, "Temperatures are in Celsius"),
    ];
    for (id, context, statement) in entries {
        store.add_fact(
            Fact::new(id, context)
                .with_statement(statement)
                .with_corpus("boiling"),
        );
    }

    let id = |s: &str| FactId::from(s);
    let relations: [(&str, &str, bool); 5] = [
        ("k-water", "k-pressure", true),
        ("k-water", "k-salt", true),
        ("k-pressure", "k-altitude", true),
        ("b-source", "b-draft", false),
        ("k-salt", "k-ice", true),
    ];
    for (a, b, linked) in relations {
        let result = if linked {
            store.link(&id(a), &id(b))
        } else {
            store.support(&id(a), &id(b))
        };
        if let Err(e) = result {
            panic!("sample corpus relation {a} -> {b}: {e}");
        }
    }

    // A stray cross-context reference, as found in inconsistent upstream data.
    if let Some(global) = store.get_mut(&id("g-units")) {
        global
            .linked_facts
            .push(FactRef::new("k-water", FactContext::Knowledge));
    }

    store
}

/// Assert that every input fact appears in exactly one stack.
pub fn assert_partition(facts: &[Fact], stacks: &[FactStack]) {
    let mut seen: HashMap<&FactId, usize> = HashMap::new();
    for stack in stacks {
        for member in stack.members() {
            *seen.entry(&member.id).or_default() += 1;
        }
    }

    for fact in facts {
        match seen.get(&fact.id) {
            Some(1) => {}
            Some(n) => panic!("fact {} appears in {n} stacks", fact.id),
            None => panic!("fact {} is missing from the stacks", fact.id),
        }
    }
    assert_eq!(
        seen.len(),
        facts.len(),
        "stacks contain facts that were not in the input"
    );
}

/// Assert that no stack mixes contexts.
pub fn assert_context_pure(stacks: &[FactStack]) {
    for stack in stacks {
        let context = stack.context();
        for member in stack.members() {
            assert_eq!(
                member.context,
                context,
                "stack {} mixes {} and {}",
                stack.primary().id,
                context,
                member.context
            );
        }
    }
}

/// Assert that each stack's related count matches its members.
pub fn assert_counts_consistent(stacks: &[FactStack]) {
    for stack in stacks {
        assert_eq!(stack.related_count() + 1, stack.members().len());
    }
}
