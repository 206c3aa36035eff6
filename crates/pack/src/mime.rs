use std::path::Path;

/// Content type used when an extension is missing or unknown.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Look up the content type for a logical path from its lowercased extension.
#[must_use]
pub fn mime_type(path: impl AsRef<Path>) -> &'static str {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| mime_guess::from_ext(&ext.to_lowercase()).first_raw())
        .unwrap_or(DEFAULT_MIME_TYPE)
}
