//! # In-Memory Store
//!
//! [`DocumentStore`] keeping every collection in process. Used by the test
//! suite and handy for running the server without a database.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::model::{fields, Collection, Document, DocumentId};

use super::errors::StoreResult;
use super::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use super::{DocumentStore, SortBy};

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Documents per collection, in insertion order
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map_or(0, Vec::len)
    }
}

fn has_id(document: &Document, id: &str) -> bool {
    document.get(fields::ID).and_then(Value::as_str) == Some(id)
}

/// Sort rank of a value's type, in the database's cross-type order.
/// Missing fields rank with null.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Total order over field values: by type rank first, then within the type
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let by_rank = type_rank(a).cmp(&type_rank(b));
    if by_rank != Ordering::Equal {
        return by_rank;
    }

    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .unwrap_or(0.0)
            .total_cmp(&b.as_f64().unwrap_or(0.0)),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(
        &self,
        collection: Collection,
        sort: Option<SortBy>,
    ) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut documents = collections.get(&collection).cloned().unwrap_or_default();

        if let Some(sort) = sort {
            documents.sort_by(|a, b| {
                let ord = compare_values(a.get(sort.field), b.get(sort.field));
                if sort.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        Ok(documents)
    }

    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| doc.get(field).and_then(Value::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<Option<Document>> {
        let id = id.to_hex();
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|doc| has_id(doc, &id)))
            .cloned())
    }

    async fn insert(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> StoreResult<InsertOutcome> {
        let id = DocumentId::new();
        document.insert(fields::ID.to_string(), Value::String(id.to_hex()));

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(document);
        Ok(InsertOutcome::new(id))
    }

    async fn upsert_fields(
        &self,
        collection: Collection,
        id: &DocumentId,
        changes: Document,
    ) -> StoreResult<UpdateOutcome> {
        let hex = id.to_hex();
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if let Some(existing) = documents.iter_mut().find(|doc| has_id(doc, &hex)) {
            let mut changed = false;
            for (key, value) in changes {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    changed = true;
                }
            }
            return Ok(UpdateOutcome::matched(u64::from(changed)));
        }

        let mut document = changes;
        document.insert(fields::ID.to_string(), Value::String(hex));
        documents.push(document);
        Ok(UpdateOutcome::upserted(*id))
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<DeleteOutcome> {
        let hex = id.to_hex();
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteOutcome::new(0));
        };

        match documents.iter().position(|doc| has_id(doc, &hex)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteOutcome::new(1))
            }
            None => Ok(DeleteOutcome::new(0)),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
