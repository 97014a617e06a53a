pub mod models;
pub mod scanner;

mod errors;

pub use errors::PhotoError;
pub use models::{allowed_extension, PhotoAsset, ALLOWED_EXTENSIONS};
pub use scanner::{discover_photos, import_photos, photo_dir, PHOTOS_DIR};
