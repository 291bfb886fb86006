//! Document store over the `document` table.
//!
//! Collections of JSON documents addressed by `collection/doc_id`. Every operation is checked
//! against [`AccessRules`] for the calling principal before touching the database, and every
//! successful write is announced on a broadcast change feed that drives live queries.

pub mod blob;
pub mod live;
pub mod rules;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::server::{
    data::document::DocumentRepository,
    error::store::StoreError,
    model::{
        permission::Operation,
        query::{CollectionQuery, Direction},
        session::Principal,
        timestamp::{normalize_last_updated, resolve_server_timestamps, Timestamp, LAST_UPDATED_FIELD},
    },
    util::slug::{random_id, GENERATED_ID_LEN},
};

pub use rules::AccessRules;

const CHANGE_FEED_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Set,
    Update,
    Delete,
}

/// Announcement of a committed write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: String,
    pub doc_id: String,
    pub kind: ChangeKind,
}

/// A document as read from the store, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Map<String, Value>,
    pub read_time: DateTime<Utc>,
}

impl StoredDocument {
    fn from_model(model: entity::document::Model, read_time: DateTime<Utc>) -> Self {
        let data = match model.data {
            Value::Object(data) => data,
            other => {
                tracing::warn!(
                    collection = %model.collection,
                    doc_id = %model.doc_id,
                    "Stored document is not an object: {}",
                    other
                );
                Map::new()
            }
        };

        Self {
            id: model.doc_id,
            data,
            read_time,
        }
    }

    /// Document data decorated with its `id` and a normalized `lastUpdated`.
    pub fn normalized(&self) -> Value {
        let mut data = self.data.clone();
        normalize_last_updated(&mut data, self.read_time);
        data.insert("id".to_string(), Value::String(self.id.clone()));

        Value::Object(data)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.normalized())
    }
}

#[derive(Clone)]
pub struct DocumentStore {
    db: DatabaseConnection,
    rules: AccessRules,
    changes: broadcast::Sender<ChangeEvent>,
}

impl DocumentStore {
    pub fn new(db: DatabaseConnection, rules: AccessRules) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);

        Self { db, rules, changes }
    }

    pub fn rules(&self) -> &AccessRules {
        &self.rules
    }

    /// Subscribes to committed writes across all collections.
    pub fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    pub async fn get(
        &self,
        caller: Option<&Principal>,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let path = document_path(collection, doc_id);
        self.rules.check(caller, Operation::Get, collection, &path)?;

        let repo = DocumentRepository::new(&self.db);
        let document = repo
            .get(collection, doc_id)
            .await?
            .map(|model| StoredDocument::from_model(model, Utc::now()));

        Ok(document)
    }

    /// Runs `query` once and returns the ordered result set.
    ///
    /// When ordered, documents lacking the order field are left out of the result.
    pub async fn list(
        &self,
        caller: Option<&Principal>,
        query: &CollectionQuery,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.rules
            .check(caller, Operation::List, &query.collection, query.path())?;

        let repo = DocumentRepository::new(&self.db);
        let read_time = Utc::now();
        let mut documents: Vec<StoredDocument> = repo
            .list(&query.collection)
            .await?
            .into_iter()
            .map(|model| StoredDocument::from_model(model, read_time))
            .collect();

        if let Some(order) = &query.order {
            documents.retain(|document| {
                document
                    .data
                    .get(&order.field)
                    .map(|value| !value.is_null())
                    .unwrap_or(false)
            });
            documents.sort_by(|a, b| {
                let ordering = compare_field(&order.field, &a.data[&order.field], &b.data[&order.field]);
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }

        Ok(documents)
    }

    /// Creates or replaces the document at `collection/doc_id`.
    pub async fn set(
        &self,
        caller: Option<&Principal>,
        collection: &str,
        doc_id: &str,
        mut data: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let path = document_path(collection, doc_id);
        if doc_id.is_empty() {
            return Err(StoreError::InvalidArgument(format!(
                "Document id for {} must not be empty",
                collection
            )));
        }

        // Creates and replacements fall under the same write rule.
        self.rules.check(caller, Operation::Create, collection, &path)?;

        let now = Utc::now();
        resolve_server_timestamps(&mut data, now);

        let repo = DocumentRepository::new(&self.db);
        let model = repo
            .upsert(collection, doc_id, Value::Object(data), now.naive_utc())
            .await?;

        self.announce(collection, doc_id, ChangeKind::Set);

        Ok(StoredDocument::from_model(model, now))
    }

    /// Creates a document under a generated id.
    pub async fn add(
        &self,
        caller: Option<&Principal>,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let doc_id = random_id(GENERATED_ID_LEN);

        self.set(caller, collection, &doc_id, data).await
    }

    /// Merges `patch` into an existing document's fields.
    ///
    /// Fails with [`StoreError::NotFound`] if the document does not exist.
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        collection: &str,
        doc_id: &str,
        mut patch: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let path = document_path(collection, doc_id);
        self.rules.check(caller, Operation::Update, collection, &path)?;

        let Some(existing) = self.get_unchecked(collection, doc_id).await? else {
            return Err(StoreError::NotFound(path));
        };

        let now = Utc::now();
        resolve_server_timestamps(&mut patch, now);

        let mut data = existing.data;
        data.extend(patch);

        let repo = DocumentRepository::new(&self.db);
        let Some(model) = repo
            .update(collection, doc_id, Value::Object(data), now.naive_utc())
            .await?
        else {
            return Err(StoreError::NotFound(path));
        };

        self.announce(collection, doc_id, ChangeKind::Update);

        Ok(StoredDocument::from_model(model, now))
    }

    /// Deletes a document, failing with [`StoreError::NotFound`] if it does not exist.
    pub async fn delete(
        &self,
        caller: Option<&Principal>,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), StoreError> {
        let path = document_path(collection, doc_id);
        self.rules.check(caller, Operation::Delete, collection, &path)?;

        let repo = DocumentRepository::new(&self.db);
        let result = repo.delete(collection, doc_id).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(path));
        }

        self.announce(collection, doc_id, ChangeKind::Delete);

        Ok(())
    }

    async fn get_unchecked(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let repo = DocumentRepository::new(&self.db);

        Ok(repo
            .get(collection, doc_id)
            .await?
            .map(|model| StoredDocument::from_model(model, Utc::now())))
    }

    fn announce(&self, collection: &str, doc_id: &str, kind: ChangeKind) {
        // Sending only fails when nobody is listening.
        let _ = self.changes.send(ChangeEvent {
            collection: collection.to_string(),
            doc_id: doc_id.to_string(),
            kind,
        });
    }
}

pub fn document_path(collection: &str, doc_id: &str) -> String {
    format!("{}/{}", collection, doc_id)
}

/// Orders two field values the way the store sorts query results.
///
/// `lastUpdated` compares as instants whatever its wire form; other values compare by type
/// rank first (bool < number < string < other).
fn compare_field(field: &str, a: &Value, b: &Value) -> Ordering {
    if field == LAST_UPDATED_FIELD {
        let a_at = Timestamp::from_value(a).and_then(|t| t.to_datetime());
        let b_at = Timestamp::from_value(b).and_then(|t| t.to_datetime());
        if let (Some(a_at), Some(b_at)) = (a_at, b_at) {
            return a_at.cmp(&b_at);
        }
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or_default();
            let b = b.as_f64().unwrap_or_default();
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
