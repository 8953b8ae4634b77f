//! # MongoDB Store
//!
//! [`DocumentStore`] backed by the hosted document database. One client is
//! created at startup and shared by every request; pooling is left to the
//! driver.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, Bson};
use mongodb::{Client, Database};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::model::{fields, Collection, Document, DocumentId};

use super::errors::StoreResult;
use super::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use super::{DocumentStore, SortBy};

/// Document store over a MongoDB database
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect and verify the server answers a ping.
    ///
    /// Fails instead of handing out a store that cannot reach the database.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let store = Self {
            database: client.database(database),
            client,
        };
        store.ping().await?;
        info!(database, "connected to document database");
        Ok(store)
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<bson::Document> {
        self.database.collection(collection.name())
    }
}

/// Filter matching one document by id
fn id_filter(id: &DocumentId) -> bson::Document {
    doc! { "_id": id.object_id() }
}

fn to_bson(document: &Document) -> StoreResult<bson::Document> {
    Ok(bson::to_document(document)?)
}

/// Convert a stored document to client JSON, rendering object ids as hex
fn to_json(mut document: bson::Document) -> Document {
    let id = document.remove(fields::ID);

    let mut json = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if let Some(id) = id {
        let id = match id {
            Bson::ObjectId(oid) => Value::String(oid.to_hex()),
            other => other.into_relaxed_extjson(),
        };
        json.insert(fields::ID.to_string(), id);
    }

    json
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_all(
        &self,
        collection: Collection,
        sort: Option<SortBy>,
    ) -> StoreResult<Vec<Document>> {
        let coll = self.collection(collection);
        let mut find = coll.find(doc! {});
        if let Some(sort) = sort {
            let mut order = bson::Document::new();
            order.insert(sort.field, sort.direction());
            find = find.sort(order);
        }

        let documents: Vec<bson::Document> = find.await?.try_collect().await?;
        debug!(%collection, count = documents.len(), "listed documents");
        Ok(documents.into_iter().map(to_json).collect())
    }

    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Document>> {
        let mut filter = bson::Document::new();
        filter.insert(field, value);

        let documents: Vec<bson::Document> = self
            .collection(collection)
            .find(filter)
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(to_json).collect())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<Option<Document>> {
        let found = self
            .collection(collection)
            .find_one(id_filter(id))
            .await?;
        Ok(found.map(to_json))
    }

    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> StoreResult<InsertOutcome> {
        let id = DocumentId::new();
        let mut document = to_bson(&document)?;
        document.insert(fields::ID, id.object_id());

        self.collection(collection).insert_one(document).await?;
        debug!(%collection, %id, "inserted document");
        Ok(InsertOutcome::new(id))
    }

    async fn upsert_fields(
        &self,
        collection: Collection,
        id: &DocumentId,
        changes: Document,
    ) -> StoreResult<UpdateOutcome> {
        let update = doc! { "$set": to_bson(&changes)? };

        let result = self
            .collection(collection)
            .update_one(id_filter(id), update)
            .upsert(true)
            .await?;

        let outcome = match result.upserted_id.as_ref().and_then(Bson::as_object_id) {
            Some(oid) => UpdateOutcome::upserted(oid.into()),
            None => UpdateOutcome {
                matched_count: result.matched_count,
                ..UpdateOutcome::matched(result.modified_count)
            },
        };
        debug!(%collection, %id, upserted = outcome.upserted_count, "updated document");
        Ok(outcome)
    }

    async fn delete_by_id(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> StoreResult<DeleteOutcome> {
        let result = self
            .collection(collection)
            .delete_one(id_filter(id))
            .await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
