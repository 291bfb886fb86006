//! Local blob storage for uploaded schedule and card images.
//!
//! Objects live at `{root}/{folder}/{key}` with a `{key}.meta.json` sidecar holding the
//! content type and, for private objects, the download token that must accompany reads.

use std::path::{Path, PathBuf};

use chrono::Utc;
use dioxus_logger::tracing;
use serde::{Deserialize, Serialize};

use crate::server::{
    error::store::StoreError,
    model::permission::Operation,
    util::slug::{random_id, slugify},
};

const META_SUFFIX: &str = ".meta.json";
const DOWNLOAD_TOKEN_LEN: usize = 32;
const KEY_NONCE_LEN: usize = 8;

/// An object to write.
pub struct BlobUpload {
    pub folder: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Public objects are readable without a download token.
    pub public: bool,
}

/// Result of a successful write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
    pub url: String,
    pub content_type: String,
    pub download_token: Option<String>,
}

/// An object read back from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobMetadata {
    content_type: String,
    file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct BlobStore {
    root: PathBuf,
    public_base: String,
}

impl BlobStore {
    /// # Arguments
    /// - `root` - Directory objects are written under
    /// - `public_base` - URL prefix objects are served from, e.g. `/uploads`
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `upload` under a fresh collision-resistant key and returns its URL.
    pub async fn put(&self, upload: BlobUpload) -> Result<StoredBlob, StoreError> {
        validate_folder(&upload.folder)?;
        if upload.bytes.is_empty() {
            return Err(StoreError::InvalidArgument(format!(
                "Refusing to store empty file {:?}",
                upload.file_name
            )));
        }

        let key = object_key(&upload.file_name);
        let folder_path = self.root.join(&upload.folder);
        tokio::fs::create_dir_all(&folder_path).await?;

        let download_token = (!upload.public).then(|| random_id(DOWNLOAD_TOKEN_LEN));
        let metadata = BlobMetadata {
            content_type: upload.content_type.clone(),
            file_name: upload.file_name.clone(),
            download_token: download_token.clone(),
        };

        tokio::fs::write(folder_path.join(&key), &upload.bytes).await?;
        tokio::fs::write(
            folder_path.join(format!("{}{}", key, META_SUFFIX)),
            serde_json::to_vec(&metadata)?,
        )
        .await?;

        let mut url = format!("{}/{}/{}", self.public_base, upload.folder, key);
        if let Some(token) = &download_token {
            url = format!("{}?token={}", url, token);
        }

        tracing::debug!(folder = %upload.folder, key = %key, "Stored blob");

        Ok(StoredBlob {
            key,
            url,
            content_type: upload.content_type,
            download_token,
        })
    }

    /// Reads an object, checking `token` against private objects.
    pub async fn get(
        &self,
        folder: &str,
        key: &str,
        token: Option<&str>,
    ) -> Result<BlobObject, StoreError> {
        let path = format!("{}/{}", folder, key);
        validate_folder(folder)?;
        if !is_safe_segment(key) || key.ends_with(META_SUFFIX) {
            return Err(StoreError::NotFound(path));
        }

        let folder_path = self.root.join(folder);
        let metadata = match tokio::fs::read(folder_path.join(format!("{}{}", key, META_SUFFIX))).await
        {
            Ok(raw) => serde_json::from_slice::<BlobMetadata>(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path))
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(expected) = &metadata.download_token {
            if token != Some(expected.as_str()) {
                return Err(StoreError::permission_denied(Operation::Get, path));
            }
        }

        let bytes = tokio::fs::read(folder_path.join(key)).await?;

        Ok(BlobObject {
            content_type: metadata.content_type,
            bytes,
        })
    }
}

/// `{millis}-{nonce}-{slug of stem}.{ext}`, falling back to `file` for unusable stems.
fn object_key(file_name: &str) -> String {
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, slugify(extension)),
        _ => (file_name, String::new()),
    };

    let mut stem = slugify(stem);
    if stem.is_empty() {
        stem = "file".to_string();
    }

    let mut key = format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        random_id(KEY_NONCE_LEN).to_lowercase(),
        stem
    );
    if !extension.is_empty() {
        key.push('.');
        key.push_str(&extension);
    }

    key
}

fn validate_folder(folder: &str) -> Result<(), StoreError> {
    if !folder.is_empty() && slugify(folder) == folder {
        Ok(())
    } else {
        Err(StoreError::InvalidArgument(format!(
            "Invalid upload folder {:?}",
            folder
        )))
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}
