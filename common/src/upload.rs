//! Plant image uploads: the checks made before anything is sent to storage
//! and the object name the file is stored under.

use crate::error::ServiceError;

/// Largest accepted image. Files of this size or more are rejected.
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// `Cache-Control` max-age (seconds) sent with stored images.
pub const IMAGE_CACHE_SECONDS: u32 = 3600;

/// Name of the file control in the admin form.
pub const IMAGE_FIELD: &str = "imagem";

/// Type and size checks, usable before the bytes are read (the browser
/// knows both from the picked file).
pub fn check_image(content_type: &str, size: usize) -> Result<(), ServiceError> {
    if !content_type.starts_with("image/") {
        return Err(ServiceError::validation(
            "Arquivo inválido: selecione uma imagem.",
        ));
    }
    if size >= MAX_IMAGE_SIZE_BYTES {
        return Err(ServiceError::validation("Imagem muito grande: limite de 5MB."));
    }
    Ok(())
}

/// A file picked in the admin form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reject non-images and oversized files.
    pub fn validate(&self) -> Result<(), ServiceError> {
        check_image(&self.content_type, self.bytes.len())
    }

    /// Extension for the stored object: the file name's, else the MIME
    /// subtype (`image/png` → `png`).
    pub fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => self
                .content_type
                .split_once('/')
                .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub).to_string())
                .unwrap_or_else(|| "bin".into()),
        }
    }

    /// Time-based object name, `<unix-millis>.<ext>`.
    pub fn storage_name(&self, unix_millis: i64) -> String {
        format!("{unix_millis}.{}", self.extension())
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn image(len: usize, content_type: &str) -> ImageUpload {
        ImageUpload::new("foto.PNG", content_type, vec![0u8; len])
    }

    #[test]
    fn test_accepts_small_image() {
        assert!(image(1024, "image/png").validate().is_ok());
        assert!(image(MAX_IMAGE_SIZE_BYTES - 1, "image/jpeg").validate().is_ok());
    }

    #[test]
    fn test_rejects_non_image() {
        for ct in ["application/pdf", "text/plain", "", "IMAGE/png", "video/image"] {
            let err = image(10, ct).validate().unwrap_err();
            assert_eq!(err.to_string(), "Arquivo inválido: selecione uma imagem.");
        }
    }

    #[test]
    fn test_rejects_at_and_above_limit() {
        for len in [MAX_IMAGE_SIZE_BYTES, MAX_IMAGE_SIZE_BYTES + 1] {
            let err = image(len, "image/png").validate().unwrap_err();
            assert_eq!(err.to_string(), "Imagem muito grande: limite de 5MB.");
        }
    }

    #[test]
    fn test_check_before_reading_bytes() {
        assert!(check_image("image/gif", 10 * 1024 * 1024).is_err());
        assert!(check_image("image/gif", 0).is_ok());
    }

    #[test]
    fn test_storage_name() {
        assert_eq!(image(1, "image/png").storage_name(1700000000123), "1700000000123.png");

        let no_ext = ImageUpload::new("foto", "image/svg+xml", vec![1]);
        assert_eq!(no_ext.storage_name(5), "5.svg");

        let trailing_dot = ImageUpload::new("foto.", "image/webp", vec![1]);
        assert_eq!(trailing_dot.extension(), "webp");
    }
}
