pub mod record_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use record_builders::RecordFileBuilder;
#[allow(unused_imports)]
pub use setup::{TestStore, TestStoreBuilder};
