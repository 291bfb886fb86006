use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, error::Error, model::app::AppState, service::identity::IdentityService,
    store::blob::BlobStore,
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the identity service that signs and verifies session tokens
pub fn build_identity_service(config: &Config) -> IdentityService {
    let identity = IdentityService::new(config.identity_token_secret.as_bytes());

    match &config.admin_credential {
        Some(credential) => identity.with_admin_credential(credential.clone()),
        None => {
            tracing::warn!("ADMIN_EMAIL and ADMIN_PASSWORD are unset, admin sign-in is disabled");
            identity
        }
    }
}

/// Create the upload directory if needed and build the blob store on top of it
pub async fn build_blob_store(config: &Config) -> Result<BlobStore, Error> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    Ok(BlobStore::new(
        config.upload_dir.clone(),
        config.upload_public_url.clone(),
    ))
}

/// Assemble the application state from configuration
pub async fn build_app_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;
    let blobs = build_blob_store(config).await?;

    Ok(AppState::new(
        db,
        build_identity_service(config),
        blobs,
        config.permission_error_log_size,
    ))
}
