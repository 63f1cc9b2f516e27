//! Fact model and relationship stacking for Terrace.
//!
//! Terrace organizes facts inside corpuses inside projects. This crate provides:
//! - The fact data model as delivered by the persistence layer
//! - An in-memory fact store that keeps relationships bidirectional
//! - Stack computation: grouping linked facts for compact display
//! - Expand/collapse view state for rendering stacks
//! - JSON snapshot persistence
//!
//! # Quick Start
//!
//! ```
//! use terrace_core::{compute_stacks, Fact, FactContext};
//!
//! let b = Fact::new("b", FactContext::Knowledge);
//! let a = Fact::new("a", FactContext::Knowledge).with_link(&b);
//!
//! let stacks = compute_stacks(&[a, b]);
//! assert_eq!(stacks.len(), 1);
//! assert_eq!(stacks[0].related_count(), 1);
//! ```

pub mod config;
pub mod corpus;
pub mod persist;
pub mod stack;
pub mod testing;
pub mod view;

// Primary public API
pub use config::{ConfigError, StackConfig};
pub use corpus::{Fact, FactContext, FactId, FactRef, FactStore, RelationSource, StoreError};
pub use persist::{FactSnapshot, PersistError};
pub use stack::{compute_stacks, ContextStacks, FactStack, StackBuilder, StackCache, StackSummary};
pub use view::{StackDisplay, StackView};
