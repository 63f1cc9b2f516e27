//! The stack partitioning pass.

use super::FactStack;
use crate::config::StackConfig;
use crate::corpus::{Fact, FactContext, FactId, RelationSource};
use std::collections::{HashMap, HashSet};

/// Computes stacks from an ordered fact list.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackBuilder {
    config: StackConfig,
}

/// The stacks computed for one context region.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextStacks {
    /// The region's context.
    pub context: FactContext,
    /// Stacks in primary order.
    pub stacks: Vec<FactStack>,
}

impl StackBuilder {
    /// Create a builder with the given config.
    pub fn new(config: StackConfig) -> Self {
        Self { config }
    }

    /// Create a builder reading the given relation source.
    pub fn with_source(source: RelationSource) -> Self {
        Self::new(StackConfig::new().with_relation_source(source))
    }

    /// The builder's config.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// The relation source this builder reads.
    pub fn relation_source(&self) -> RelationSource {
        self.config.relation_source
    }

    /// Partition facts into stacks.
    ///
    /// Facts are scanned in order. The first unclaimed fact seeds a stack and
    /// claims every referenced fact that is present in `facts`, shares its
    /// context, and is not yet claimed. References to facts outside `facts` are
    /// ignored. The result covers every input fact exactly once.
    pub fn compute_stacks(&self, facts: &[Fact]) -> Vec<FactStack> {
        let index: HashMap<&FactId, &Fact> = facts.iter().map(|f| (&f.id, f)).collect();
        let mut claimed: HashSet<&FactId> = HashSet::with_capacity(facts.len());
        let mut stacks = Vec::new();

        for fact in facts {
            if !claimed.insert(&fact.id) {
                continue;
            }

            let mut related = Vec::new();
            for reference in self.config.relation_source.references(fact) {
                let Some(&other) = index.get(&reference.id) else {
                    tracing::debug!(
                        fact = %fact.id,
                        reference = %reference.id,
                        "ignoring reference to fact outside the input"
                    );
                    continue;
                };

                if other.context != fact.context {
                    tracing::debug!(
                        fact = %fact.id,
                        context = %fact.context,
                        reference = %other.id,
                        reference_context = %other.context,
                        "ignoring cross-context reference"
                    );
                    continue;
                }

                // Also rejects self references and duplicates within this stack.
                if claimed.insert(&other.id) {
                    related.push(other.clone());
                }
            }

            stacks.push(FactStack::new(fact.clone(), related));
        }

        tracing::trace!(
            facts = facts.len(),
            stacks = stacks.len(),
            source = %self.config.relation_source,
            "computed fact stacks"
        );
        stacks
    }

    /// Split facts by context and stack each region separately.
    ///
    /// When the config names a context only that region is returned.
    pub fn compute_regions(&self, facts: &[Fact]) -> Vec<ContextStacks> {
        group_by_context(facts)
            .into_iter()
            .filter(|(context, _)| self.config.context.is_none_or(|c| c == *context))
            .map(|(context, region)| ContextStacks {
                context,
                stacks: self.compute_stacks(&region),
            })
            .collect()
    }
}

/// Partition facts into stacks with the default config.
pub fn compute_stacks(facts: &[Fact]) -> Vec<FactStack> {
    StackBuilder::default().compute_stacks(facts)
}

/// Split facts into per-context regions, preserving input order within each.
///
/// Regions come back in [`FactContext::ALL`] order; empty regions are omitted.
pub fn group_by_context(facts: &[Fact]) -> Vec<(FactContext, Vec<Fact>)> {
    FactContext::ALL
        .into_iter()
        .map(|context| {
            let region: Vec<Fact> = facts
                .iter()
                .filter(|f| f.context == context)
                .cloned()
                .collect();
            (context, region)
        })
        .filter(|(_, region)| !region.is_empty())
        .collect()
}
