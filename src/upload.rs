use axum::extract::{multipart::MultipartError, Multipart};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FILE_FIELD: &str = "file";

/// Extensions a stored upload may carry.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No image file found in the request")]
    MissingFile,
    #[error("Empty filename")]
    EmptyFilename,
    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Not an image filename: {0}")]
    UnsupportedFilename(String),
    #[error("Failed to store upload: {0}")]
    Persist(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub data: Bytes,
}

/// Pulls the `file` part out of a multipart form.
///
/// A `file` part without a filename is a plain form value, not an upload.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if filename.is_empty() {
            return Err(UploadError::EmptyFilename);
        }
        let data = field.bytes().await?;
        return Ok(Upload { filename, data });
    }

    Err(UploadError::MissingFile)
}

/// Final path component of a client supplied filename, kept only when it
/// ends in one of [`IMAGE_EXTENSIONS`].
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next()?.trim();
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty()
        || !IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        return None;
    }
    Some(name.to_string())
}

/// Writes the upload into `dir`, replacing any file with the same name.
pub async fn persist_upload(dir: &Path, upload: &Upload) -> Result<PathBuf, UploadError> {
    let name = sanitize_filename(&upload.filename)
        .ok_or_else(|| UploadError::UnsupportedFilename(upload.filename.clone()))?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, &upload.data).await?;
    tracing::debug!("Stored upload at {:?}", path);
    Ok(path)
}
