use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::Value;

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn document<'a>(&'a self) -> DocumentFixtures<'a> {
        DocumentFixtures { setup: self }
    }
}

pub struct DocumentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> DocumentFixtures<'a> {
    pub async fn insert_document(
        &self,
        collection: &str,
        doc_id: &str,
        data: Value,
    ) -> Result<entity::document::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Document::insert(entity::document::ActiveModel {
                collection: ActiveValue::Set(collection.to_string()),
                doc_id: ActiveValue::Set(doc_id.to_string()),
                data: ActiveValue::Set(data),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn find_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<entity::document::Model>, TestError> {
        Ok(entity::prelude::Document::find()
            .filter(entity::document::Column::Collection.eq(collection))
            .filter(entity::document::Column::DocId.eq(doc_id))
            .one(&self.setup.db)
            .await?)
    }

    pub async fn count_documents(&self, collection: &str) -> Result<u64, TestError> {
        Ok(entity::prelude::Document::find()
            .filter(entity::document::Column::Collection.eq(collection))
            .count(&self.setup.db)
            .await?)
    }
}
