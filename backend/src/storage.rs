use crate::error::ApiError;
use std::fs;
use std::path::Path;

/// Persists an uploaded file under a name derived from the md5 of its bytes,
/// keeping the original extension, and returns the `/uploads/...` URL that
/// gets stored in the owning document. Re-uploading identical bytes lands on
/// the same file.
pub fn store_upload(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, ApiError> {
    let digest = md5::compute(bytes);
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let file_name = format!("{digest:x}.{ext}");
    fs::write(uploads_dir.join(&file_name), bytes)?;
    Ok(format!("/uploads/{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_under_md5_name_and_returns_url() {
        let tmp = tempfile::tempdir().unwrap();
        let url = store_upload(tmp.path(), "pan-card.jpg", b"fake image bytes").unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".jpg"));

        let stored = tmp.path().join(url.trim_start_matches("/uploads/"));
        assert_eq!(fs::read(stored).unwrap(), b"fake image bytes");

        // same bytes, same file
        let again = store_upload(tmp.path(), "other-name.jpg", b"fake image bytes").unwrap();
        assert_eq!(url, again);
    }

    #[test]
    fn missing_extension_falls_back_to_bin() {
        let tmp = tempfile::tempdir().unwrap();
        let url = store_upload(tmp.path(), "attachment", b"x").unwrap();
        assert!(url.ends_with(".bin"));
    }
}
