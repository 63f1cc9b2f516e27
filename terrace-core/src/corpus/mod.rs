//! Facts, their contexts, and the relationships between them.
//!
//! Facts arrive from the persistence layer with their relationship arrays
//! already filled in. A relationship is stored on both ends:
//!
//! ```text
//!   a.linkedFacts  ──► b        a.supports     ──► b
//!   b.linkedFacts  ──► a        b.supportedBy  ──► a
//! ```
//!
//! The [`FactStore`] keeps both ends in sync when facts are related locally.

mod context;
mod fact;
mod relationship;
mod store;

pub use context::{FactContext, ParseContextError};
pub use fact::{Fact, FactId, FactRef};
pub use relationship::{ParseSourceError, RelationSource};
pub use store::{FactStore, StoreError};
