//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::Schema;
use serde_json::Value;

use crate::{error::TestError, fixtures::factory, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and seeded
/// documents. Methods can be chained together and finalized with `build()` to create a
/// complete test context.
pub struct TestBuilder {
    include_document_table: bool,

    // Documents to insert (collection, doc_id, data)
    documents: Vec<(String, String, Value)>,
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables or documents configured.
    pub fn new() -> Self {
        Self {
            include_document_table: false,
            documents: Vec::new(),
        }
    }

    /// Add the `document` table to the test database.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_document_table(mut self) -> Self {
        self.include_document_table = true;
        self
    }

    /// Insert a document into the test database.
    ///
    /// Implies [`with_document_table`](Self::with_document_table). Documents are inserted in
    /// the order they were queued.
    ///
    /// # Arguments
    /// - `collection` - Collection name, e.g. `routes`
    /// - `doc_id` - Document identifier within the collection
    /// - `data` - JSON object stored as the document's fields
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_document(
        mut self,
        collection: impl Into<String>,
        doc_id: impl Into<String>,
        data: Value,
    ) -> Self {
        self.include_document_table = true;
        self.documents
            .push((collection.into(), doc_id.into(), data));
        self
    }

    /// Insert a route document built by [`factory::route`].
    pub fn with_route(self, doc_id: &str, nombre: &str, category: &str) -> Self {
        self.with_document("routes", doc_id, factory::route(nombre, category))
    }

    /// Insert an alert document built by [`factory::alert`].
    pub fn with_alert(self, doc_id: &str, titulo: &str) -> Self {
        self.with_document("alerts", doc_id, factory::alert(titulo))
    }

    /// Insert a driver document built by [`factory::driver`].
    pub fn with_driver(self, doc_id: &str, nombre: &str) -> Self {
        self.with_document("drivers", doc_id, factory::driver(nombre))
    }

    /// Build the test context by creating all configured tables and documents.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or document insertion failed
    /// - `Err(TestError::IoError)` - Temporary upload directory could not be created
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut tables = Vec::new();

        if self.include_document_table {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            tables.push(schema.create_table_from_entity(entity::prelude::Document));
        }

        setup.with_tables(tables).await?;

        // 2. Insert documents
        for (collection, doc_id, data) in self.documents {
            setup
                .document()
                .insert_document(&collection, &doc_id, data)
                .await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_builder_creates_document_table() {
        let result = TestBuilder::new().with_document_table().build().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_builder_chains_methods() {
        let result = TestBuilder::new()
            .with_route("grecia-centro", "Grecia-Centro", "grecia")
            .with_alert("a1", "Cierre parcial")
            .with_document("drivers", "d1", json!({ "nombre": "Ana" }))
            .build()
            .await;
        assert!(result.is_ok());
    }
}
