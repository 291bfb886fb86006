//! Tests for uploading and serving files.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, StatusCode},
};
use transit::{model::api::ActionResult, server::store::blob::BlobUpload};

use super::*;

/// Expect an admin upload to be served back from its public URL
#[tokio::test]
async fn upload_then_download() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let mut upload = request(
        Method::POST,
        "/api/admin/uploads/horarios",
        Some(&token),
        Body::from(vec![0x89, 0x50, 0x4e, 0x47]),
    );
    upload
        .headers_mut()
        .insert(CONTENT_TYPE, "image/png".parse().unwrap());
    upload
        .headers_mut()
        .insert("x-file-name", "Horario Grecia.png".parse().unwrap());

    let result: ActionResult<String> = read_json(send(&state, upload).await).await?;
    let url = result.data.unwrap();
    assert!(url.starts_with("/uploads/horarios/"));

    let resp = send(&state, request(Method::GET, &url, None, Body::empty())).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "image/png");
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), &[0x89, 0x50, 0x4e, 0x47]);

    Ok(())
}

/// Expect an empty upload to be reported as a missing file
#[tokio::test]
async fn empty_upload_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();
    let token = test.identity().admin_token()?;

    let result: ActionResult<String> = read_json(
        send(
            &state,
            request(
                Method::POST,
                "/api/admin/uploads/horarios",
                Some(&token),
                Body::empty(),
            ),
        )
        .await,
    )
    .await?;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("No file provided."));

    Ok(())
}

/// Expect private files to require their download token
#[tokio::test]
async fn private_file_requires_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_document_table().build().await?;
    let state: AppState = test.to_app_state();

    let blob = state
        .blobs
        .put(BlobUpload {
            folder: "privado".to_string(),
            file_name: "planilla.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
            public: false,
        })
        .await
        .unwrap();
    let bare_url = format!("/uploads/privado/{}", blob.key);

    let without = send(&state, request(Method::GET, &bare_url, None, Body::empty())).await;
    let with = send(&state, request(Method::GET, &blob.url, None, Body::empty())).await;
    let missing = send(
        &state,
        request(Method::GET, "/uploads/privado/nada.pdf", None, Body::empty()),
    )
    .await;

    assert_eq!(without.status(), StatusCode::FORBIDDEN);
    assert_eq!(with.status(), StatusCode::OK);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    Ok(())
}
