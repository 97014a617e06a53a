use std::path::Path;

use serde::{Deserialize, Serialize};

/// Image extensions recognised in the photo store, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// An image file discovered under `photos/{date}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAsset {
    pub filename: String,
    /// Store-relative path, `photos/{date}/{filename}`
    pub path: String,
    /// Lowercased extension
    pub extension: String,
}

impl PhotoAsset {
    pub fn new(filename: String, path: String) -> Self {
        let extension = allowed_extension(Path::new(&filename)).unwrap_or_default();
        Self {
            filename,
            path,
            extension,
        }
    }
}

/// Lowercased extension of `path` if it is on the allow-list
pub fn allowed_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
