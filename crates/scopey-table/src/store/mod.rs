//! Chained hash storage for declaration records.
//!
//! The store is a fixed-bucket-count hash table mapping identifier strings
//! to chains of declaration records, one record per declaration across all
//! currently-live scopes. Duplicate identifiers coexist, differentiated by
//! scope depth; removal is O(1) given the handle returned at insertion.
//!
//! ## Structure
//!
//! - `hash` - bucket index computation for identifier strings
//! - `arena` - slot arena owning every record, addressed by [`RecordRef`]
//! - `buckets` - the [`HashStore`] chains built on top of the arena

pub mod hash;

mod arena;
mod buckets;

pub use arena::{DeclRecord, RecordRef};
pub use buckets::HashStore;
