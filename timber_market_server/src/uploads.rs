//! Persistence for base64 file uploads (bank slips, custom-order reference images).
//!
//! Files arrive as base64 strings inside JSON bodies and are written under the configured upload directory. The
//! stored path is what gets recorded on the order; serving the files back is a reverse-proxy concern.

use std::{fs, path::Path};

use log::*;
use rand::Rng;

use crate::{data_objects::FileUpload, errors::ServerError};

/// Strips anything path-like from a client-supplied file name; only the final component survives.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("upload");
    let cleaned: String =
        base.chars().filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')).collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Decodes and writes an upload under `{upload_dir}/{subdir}/`, returning the stored relative path. A random
/// prefix keeps concurrent uploads with the same name from clobbering each other.
pub fn save_upload(upload_dir: &str, subdir: &str, upload: &FileUpload) -> Result<String, ServerError> {
    let bytes = base64::decode(&upload.data)
        .map_err(|e| ServerError::UploadError(format!("Invalid base64 payload: {e}")))?;
    if bytes.is_empty() {
        return Err(ServerError::UploadError("Uploaded file is empty".to_string()));
    }
    let dir = Path::new(upload_dir).join(subdir);
    fs::create_dir_all(&dir)?;
    let tag: u64 = rand::thread_rng().gen();
    let name = format!("{tag:016x}_{}", sanitize_file_name(&upload.file_name));
    let path = dir.join(&name);
    fs::write(&path, &bytes)?;
    debug!("💻️ Stored upload {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_string_lossy().into_owned())
}
