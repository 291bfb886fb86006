use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use serde_json::Value;

pub struct DocumentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    /// Creates a new instance of [`DocumentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<entity::document::Model>, DbErr> {
        entity::prelude::Document::find()
            .filter(entity::document::Column::Collection.eq(collection))
            .filter(entity::document::Column::DocId.eq(doc_id))
            .one(self.db)
            .await
    }

    /// Lists every document of a collection in insertion order
    pub async fn list(&self, collection: &str) -> Result<Vec<entity::document::Model>, DbErr> {
        entity::prelude::Document::find()
            .filter(entity::document::Column::Collection.eq(collection))
            .order_by_asc(entity::document::Column::Id)
            .all(self.db)
            .await
    }

    /// Creates the document or replaces the data of an existing one
    pub async fn upsert(
        &self,
        collection: &str,
        doc_id: &str,
        data: Value,
        now: NaiveDateTime,
    ) -> Result<entity::document::Model, DbErr> {
        match self.get(collection, doc_id).await? {
            Some(existing) => {
                let mut document_am = existing.into_active_model();
                document_am.data = ActiveValue::Set(data);
                document_am.updated_at = ActiveValue::Set(now);

                document_am.update(self.db).await
            }
            None => {
                let document = entity::document::ActiveModel {
                    collection: ActiveValue::Set(collection.to_string()),
                    doc_id: ActiveValue::Set(doc_id.to_string()),
                    data: ActiveValue::Set(data),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };

                document.insert(self.db).await
            }
        }
    }

    /// Replaces the data of an existing document
    ///
    /// Returns `Ok(None)` if the document does not exist.
    pub async fn update(
        &self,
        collection: &str,
        doc_id: &str,
        data: Value,
        now: NaiveDateTime,
    ) -> Result<Option<entity::document::Model>, DbErr> {
        let Some(existing) = self.get(collection, doc_id).await? else {
            return Ok(None);
        };

        let mut document_am = existing.into_active_model();
        document_am.data = ActiveValue::Set(data);
        document_am.updated_at = ActiveValue::Set(now);

        let document = document_am.update(self.db).await?;

        Ok(Some(document))
    }

    /// Deletes a document
    ///
    /// Returns OK regardless of the document existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, collection: &str, doc_id: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::Document::delete_many()
            .filter(entity::document::Column::Collection.eq(collection))
            .filter(entity::document::Column::DocId.eq(doc_id))
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod upsert {
        use chrono::Utc;
        use serde_json::json;
        use transit_test_utils::prelude::*;

        use crate::server::data::document::DocumentRepository;

        /// Expect a new document to be created when none exists
        #[tokio::test]
        async fn creates_document() -> Result<(), TestError> {
            let test = TestBuilder::new().with_document_table().build().await?;

            let repo = DocumentRepository::new(&test.db);
            let result = repo
                .upsert("alerts", "a1", json!({ "titulo": "Desvío" }), Utc::now().naive_utc())
                .await;

            assert!(result.is_ok());
            let document = result.unwrap();
            assert_eq!(document.collection, "alerts");
            assert_eq!(document.doc_id, "a1");

            Ok(())
        }

        /// Expect data of an existing document to be replaced rather than duplicated
        #[tokio::test]
        async fn replaces_existing_document() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_document("alerts", "a1", json!({ "titulo": "Viejo" }))
                .build()
                .await?;

            let repo = DocumentRepository::new(&test.db);
            let updated = repo
                .upsert("alerts", "a1", json!({ "titulo": "Nuevo" }), Utc::now().naive_utc())
                .await?;

            assert_eq!(updated.data, json!({ "titulo": "Nuevo" }));
            assert_eq!(repo.list("alerts").await?.len(), 1);

            Ok(())
        }

        /// Expect Error when required database tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let repo = DocumentRepository::new(&test.db);
            let result = repo
                .upsert("alerts", "a1", json!({}), Utc::now().naive_utc())
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod update {
        use chrono::Utc;
        use serde_json::json;
        use transit_test_utils::prelude::*;

        use crate::server::data::document::DocumentRepository;

        /// Expect Ok(None) when the document does not exist
        #[tokio::test]
        async fn returns_none_for_missing_document() -> Result<(), TestError> {
            let test = TestBuilder::new().with_document_table().build().await?;

            let repo = DocumentRepository::new(&test.db);
            let result = repo
                .update("drivers", "nobody", json!({}), Utc::now().naive_utc())
                .await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }
    }

    mod list {
        use serde_json::json;
        use transit_test_utils::prelude::*;

        use crate::server::data::document::DocumentRepository;

        /// Expect only documents of the requested collection, in insertion order
        #[tokio::test]
        async fn lists_collection_in_insertion_order() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_document("alerts", "second", json!({ "titulo": "B" }))
                .with_document("routes", "r1", json!({ "nombre": "R" }))
                .with_document("alerts", "first", json!({ "titulo": "A" }))
                .build()
                .await?;

            let repo = DocumentRepository::new(&test.db);
            let alerts = repo.list("alerts").await?;

            let ids: Vec<&str> = alerts.iter().map(|d| d.doc_id.as_str()).collect();
            assert_eq!(ids, vec!["second", "first"]);

            Ok(())
        }
    }

    mod delete {
        use serde_json::json;
        use transit_test_utils::prelude::*;

        use crate::server::data::document::DocumentRepository;

        /// Expect one affected row on the first delete and none on the second
        #[tokio::test]
        async fn deletes_document_once() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_document("drivers", "d1", json!({ "nombre": "Ana" }))
                .build()
                .await?;

            let repo = DocumentRepository::new(&test.db);

            assert_eq!(repo.delete("drivers", "d1").await?.rows_affected, 1);
            assert_eq!(repo.delete("drivers", "d1").await?.rows_affected, 0);
            assert!(repo.get("drivers", "d1").await?.is_none());

            Ok(())
        }
    }
}
