pub mod builder;
pub mod codec;
pub mod models;
pub mod repository;
pub mod template;

mod errors;

pub use builder::{
    attach_photos, parse_roster, update_info, validate_date, AttachReport, InfoPatch, NewRecord,
    RecordBuilder,
};
pub use errors::RecordError;
pub use models::*;
pub use repository::{FsRecordStore, InMemoryRecordStore, RecordStore};
pub use template::{BuiltinTemplate, FileTemplate, TemplateProvider};
