use std::fs;
use std::path::PathBuf;

use super::RecordError;

/// Placeholder the skeleton uses wherever the match date belongs
pub const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

/// Supplies the skeleton text a new record is built from.
///
/// The skeleton is itself a record file: its frontmatter may carry extra
/// keys to seed every new record, and its body becomes the new record's
/// body after date substitution.
pub trait TemplateProvider {
    fn skeleton(&self) -> Result<String, RecordError>;
}

/// Skeleton compiled into the binary, used when no template file is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplate;

const BUILTIN_SKELETON: &str = "---
---

## 比赛概况

## 精彩瞬间

![照片](photos/YYYY-MM-DD/photo-001.jpg)

## 赛后总结

";

impl TemplateProvider for BuiltinTemplate {
    fn skeleton(&self) -> Result<String, RecordError> {
        Ok(BUILTIN_SKELETON.to_string())
    }
}

/// Skeleton read from a file on every call
#[derive(Debug, Clone)]
pub struct FileTemplate {
    path: PathBuf,
}

impl FileTemplate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateProvider for FileTemplate {
    fn skeleton(&self) -> Result<String, RecordError> {
        fs::read_to_string(&self.path).map_err(|err| RecordError::io(&self.path, err))
    }
}
