//! # Document Store
//!
//! Thin data-access layer: every HTTP route maps onto exactly one call of
//! [`DocumentStore`]. Two implementations exist:
//!
//! - [`MongoStore`] talks to the hosted document database
//! - [`MemoryStore`] keeps collections in process, for tests and local runs
//!
//! The store performs no validation. Bodies are stored as given, apart from
//! the `_id` field which is always assigned by the store.

mod errors;
mod memory;
mod mongo;
mod outcome;

use async_trait::async_trait;

use crate::model::{Collection, Document, DocumentId};

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};

/// Sort order for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub field: &'static str,
    pub descending: bool,
}

impl SortBy {
    pub fn descending(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    pub fn ascending(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    /// Direction as the database expects it (`1` or `-1`)
    pub fn direction(&self) -> i32 {
        if self.descending {
            -1
        } else {
            1
        }
    }
}

/// Operations the HTTP layer needs from the database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection, optionally sorted
    async fn find_all(
        &self,
        collection: Collection,
        sort: Option<SortBy>,
    ) -> StoreResult<Vec<Document>>;

    /// Documents whose string `field` equals `value`
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Document>>;

    /// A single document, `None` when absent
    async fn find_by_id(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<Option<Document>>;

    /// Insert a document; any client supplied `_id` is replaced
    async fn insert(&self, collection: Collection, document: Document)
        -> StoreResult<InsertOutcome>;

    /// Set every field of `changes` on the document with `id`.
    ///
    /// Creates the document when no document has that id (upsert).
    async fn upsert_fields(
        &self,
        collection: Collection,
        id: &DocumentId,
        changes: Document,
    ) -> StoreResult<UpdateOutcome>;

    /// Delete at most one document by id
    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<DeleteOutcome>;

    /// Round-trip to the database to confirm it is reachable
    async fn ping(&self) -> StoreResult<()>;
}
