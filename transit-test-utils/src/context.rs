//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context includes an
//! in-memory SQLite database, a temporary upload directory and helpers to mint identity
//! tokens signed with the test secret.

use std::path::{Path, PathBuf};

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;

use crate::{constant::TEST_IDENTITY_SECRET, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let test = TestBuilder::new().with_document_table().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Sign in as an admin
/// let token = test.identity().admin_token()?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Secret identity tokens are signed with
    pub identity_secret: String,

    /// Temporary directory uploads are written to, removed on drop
    pub(crate) upload_dir: TempDir,
}

impl TestContext {
    /// Convert the test resources into any type that can be constructed from them
    ///
    /// This allows conversion to AppState without creating a circular dependency
    /// between the test-utils crate and the main transit crate.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // In integration tests
    /// let app_state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, String, PathBuf)>,
    {
        T::from((
            self.db.clone(),
            self.identity_secret.clone(),
            self.upload_dir.path().to_path_buf(),
        ))
    }

    /// Directory uploads are written to for this test.
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    /// - `Err(TestError::IoError)` - Temporary directory creation failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;
        let upload_dir = tempfile::tempdir()?;

        Ok(TestContext {
            db,
            identity_secret: TEST_IDENTITY_SECRET.to_string(),
            upload_dir,
        })
    }

    /// Create database tables from schema statements.
    ///
    /// # Arguments
    /// - `stmts` - Vector of CREATE TABLE statements to execute
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
