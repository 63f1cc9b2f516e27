//! Grouping related facts into stacks for compact display.
//!
//! A stack is one primary fact plus the same-context facts it is linked to.
//! Every fact lands in exactly one stack:
//!
//! ```text
//!   input:   a ── b     c     d ── a
//!                               (d already claimed by a)
//!   stacks:  [a, b, d]  [c]
//! ```

mod builder;
mod cache;

pub use builder::{compute_stacks, group_by_context, ContextStacks, StackBuilder};
pub use cache::StackCache;

use crate::corpus::{Fact, FactContext, FactId};
use serde::{Deserialize, Serialize};

/// A primary fact and the related facts grouped under it.
#[derive(Debug, Clone, PartialEq)]
pub struct FactStack {
    /// Primary first, then related facts in discovery order. Never empty.
    members: Vec<Fact>,
}

impl FactStack {
    pub(crate) fn new(primary: Fact, related: Vec<Fact>) -> Self {
        let mut members = Vec::with_capacity(related.len() + 1);
        members.push(primary);
        members.extend(related);
        Self { members }
    }

    /// The fact representing this stack.
    pub fn primary(&self) -> &Fact {
        &self.members[0]
    }

    /// All members, primary first.
    pub fn members(&self) -> &[Fact] {
        &self.members
    }

    /// Members excluding the primary.
    pub fn related(&self) -> &[Fact] {
        &self.members[1..]
    }

    /// Number of related facts actually placed in this stack.
    pub fn related_count(&self) -> usize {
        self.members.len() - 1
    }

    /// Check if this stack is a lone fact.
    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    /// Context shared by every member.
    pub fn context(&self) -> FactContext {
        self.primary().context
    }

    /// Member ids, primary first.
    pub fn member_ids(&self) -> Vec<&FactId> {
        self.members.iter().map(|f| &f.id).collect()
    }

    /// Check if a fact is a member of this stack.
    pub fn contains(&self, id: &FactId) -> bool {
        self.members.iter().any(|f| &f.id == id)
    }

    /// Id-only summary of this stack.
    pub fn summary(&self) -> StackSummary {
        StackSummary {
            primary: self.primary().id.clone(),
            members: self.members.iter().map(|f| f.id.clone()).collect(),
            related_count: self.related_count(),
        }
    }
}

/// Serializable, id-only view of a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSummary {
    /// Primary fact id.
    pub primary: FactId,
    /// Member ids, primary first.
    pub members: Vec<FactId>,
    /// Number of members excluding the primary.
    pub related_count: usize,
}

impl StackSummary {
    /// Build a summary from string ids, primary first.
    pub fn of(members: &[&str]) -> Self {
        let members: Vec<FactId> = members.iter().map(|id| FactId::from(*id)).collect();
        Self {
            primary: members.first().cloned().unwrap_or_else(|| FactId::from("")),
            related_count: members.len().saturating_sub(1),
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_accessors() {
        let stack = FactStack::new(
            Fact::new("a", FactContext::Knowledge),
            vec![
                Fact::new("b", FactContext::Knowledge),
                Fact::new("c", FactContext::Knowledge),
            ],
        );

        assert_eq!(stack.primary().id, FactId::from("a"));
        assert_eq!(stack.related_count(), 2);
        assert_eq!(stack.related().len(), 2);
        assert!(!stack.is_single());
        assert!(stack.contains(&FactId::from("c")));
        assert_eq!(stack.context(), FactContext::Knowledge);
        assert_eq!(stack.summary(), StackSummary::of(&["a", "b", "c"]));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(StackSummary::of(&["a", "b"])).unwrap();
        assert_eq!(json["primary"], "a");
        assert_eq!(json["relatedCount"], 1);
        assert_eq!(json["members"][1], "b");
    }
}
