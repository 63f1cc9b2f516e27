//! Expand/collapse state for rendering stacks.

use crate::corpus::{Fact, FactId};
use crate::stack::FactStack;
use std::collections::HashSet;

/// How a single stack should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StackDisplay<'a> {
    /// A lone fact, drawn as a plain card.
    Card(&'a Fact),
    /// A collapsed stack: the primary card layered over the rest, with a badge.
    Stacked {
        primary: &'a Fact,
        /// Number of related facts hidden under the primary.
        badge: usize,
    },
    /// An expanded stack: every member drawn individually, primary first.
    Expanded(&'a [Fact]),
}

impl<'a> StackDisplay<'a> {
    /// The fact representing this entry.
    pub fn primary(&self) -> &'a Fact {
        match *self {
            StackDisplay::Card(fact) => fact,
            StackDisplay::Stacked { primary, .. } => primary,
            StackDisplay::Expanded(members) => &members[0],
        }
    }

    /// Number of card rows this entry occupies.
    pub fn rows(&self) -> usize {
        match self {
            StackDisplay::Card(_) | StackDisplay::Stacked { .. } => 1,
            StackDisplay::Expanded(members) => members.len(),
        }
    }
}

/// Tracks which stacks are expanded, keyed by primary fact.
#[derive(Debug, Clone, Default)]
pub struct StackView {
    expanded: HashSet<FactId>,
}

impl StackView {
    /// Create a view with every stack collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the stack with this primary is expanded.
    pub fn is_expanded(&self, primary: &FactId) -> bool {
        self.expanded.contains(primary)
    }

    /// Expand a stack.
    pub fn expand(&mut self, primary: &FactId) {
        self.expanded.insert(primary.clone());
    }

    /// Collapse a stack.
    pub fn collapse(&mut self, primary: &FactId) {
        self.expanded.remove(primary);
    }

    /// Toggle a stack. Returns true if it is now expanded.
    pub fn toggle(&mut self, primary: &FactId) -> bool {
        if self.expanded.remove(primary) {
            false
        } else {
            self.expanded.insert(primary.clone());
            true
        }
    }

    /// Collapse every stack.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Number of expanded stacks.
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Forget expansion state for primaries no longer heading a stack.
    pub fn retain(&mut self, stacks: &[FactStack]) {
        let primaries: HashSet<&FactId> = stacks.iter().map(|s| &s.primary().id).collect();
        self.expanded.retain(|id| primaries.contains(id));
    }

    /// Decide how each stack is drawn.
    ///
    /// Lone facts are always cards, even when marked expanded.
    pub fn layout<'a>(&self, stacks: &'a [FactStack]) -> Vec<StackDisplay<'a>> {
        stacks
            .iter()
            .map(|stack| {
                if stack.is_single() {
                    StackDisplay::Card(stack.primary())
                } else if self.is_expanded(&stack.primary().id) {
                    StackDisplay::Expanded(stack.members())
                } else {
                    StackDisplay::Stacked {
                        primary: stack.primary(),
                        badge: stack.related_count(),
                    }
                }
            })
            .collect()
    }
}
