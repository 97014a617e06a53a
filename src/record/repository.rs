use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{
    codec,
    models::{record_file_name, RECORD_EXTENSION},
    MatchRecord, RecordError,
};

/// Directory under the store root holding record files
pub const MATCHES_DIR: &str = "matches";

/// Trait for record store operations
pub trait RecordStore {
    /// Record filenames in store order: newest first
    fn list(&self) -> Result<Vec<String>, RecordError>;
    fn load_file(&self, file: &str) -> Result<MatchRecord, RecordError>;
    fn exists(&self, date: &str, opponent: &str) -> Result<bool, RecordError>;
    /// Persists a record. Refuses to replace an existing file unless `overwrite` is set.
    fn save(&mut self, record: &MatchRecord, overwrite: bool) -> Result<String, RecordError>;
    /// Rewrites an existing file in place, whatever identity its frontmatter carries
    fn save_file(&mut self, file: &str, record: &MatchRecord) -> Result<(), RecordError>;

    fn load(&self, date: &str, opponent: &str) -> Result<MatchRecord, RecordError> {
        self.load_file(&record_file_name(date, opponent))
    }

    /// Newest record by filename, if any
    fn latest(&self) -> Result<Option<(String, MatchRecord)>, RecordError> {
        match self.list()?.into_iter().next() {
            Some(file) => {
                let record = self.load_file(&file)?;
                Ok(Some((file, record)))
            }
            None => Ok(None),
        }
    }
}

/// Record store backed by `{root}/matches/*.md`
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    dir: PathBuf,
}

impl FsRecordStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(MATCHES_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Writes to a sibling temp file and renames it into place
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), RecordError> {
        fs::create_dir_all(&self.dir).map_err(|err| RecordError::io(&self.dir, err))?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);

        fs::write(&tmp, contents).map_err(|err| RecordError::io(&tmp, err))?;
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(RecordError::io(path, err));
        }
        Ok(())
    }
}

impl RecordStore for FsRecordStore {
    #[instrument(skip(self))]
    fn list(&self) -> Result<Vec<String>, RecordError> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "Matches directory does not exist");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|err| RecordError::io(&self.dir, err))?;
        let suffix = format!(".{}", RECORD_EXTENSION);
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| RecordError::io(&self.dir, err))?;
            let is_file = entry
                .file_type()
                .map(|kind| kind.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(&suffix) {
                    files.push(name.to_string());
                }
            }
        }

        files.sort();
        files.reverse();
        debug!(count = files.len(), "Listed record files");
        Ok(files)
    }

    #[instrument(skip(self))]
    fn load_file(&self, file: &str) -> Result<MatchRecord, RecordError> {
        let path = self.path_of(file);
        if !path.is_file() {
            return Err(RecordError::NotFound {
                file: file.to_string(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|err| RecordError::io(&path, err))?;
        codec::decode(&text).map_err(|err| match err {
            RecordError::Malformed { reason } => RecordError::Malformed {
                reason: format!("{}: {}", file, reason),
            },
            other => other,
        })
    }

    fn exists(&self, date: &str, opponent: &str) -> Result<bool, RecordError> {
        Ok(self.path_of(&record_file_name(date, opponent)).is_file())
    }

    #[instrument(skip(self, record))]
    fn save(&mut self, record: &MatchRecord, overwrite: bool) -> Result<String, RecordError> {
        let file = record.file_name()?;
        let path = self.path_of(&file);

        if path.exists() && !overwrite {
            warn!(file = %file, "Record already exists");
            return Err(RecordError::DuplicateRecord { file });
        }

        let contents = codec::encode(record)?;
        self.write_atomic(&path, &contents)?;
        info!(file = %file, bytes = contents.len(), "Record saved");
        Ok(file)
    }

    #[instrument(skip(self, record))]
    fn save_file(&mut self, file: &str, record: &MatchRecord) -> Result<(), RecordError> {
        let path = self.path_of(file);
        if !path.is_file() {
            return Err(RecordError::NotFound {
                file: file.to_string(),
            });
        }

        let contents = codec::encode(record)?;
        self.write_atomic(&path, &contents)?;
        info!(file = %file, bytes = contents.len(), "Record updated");
        Ok(())
    }
}

/// In-memory implementation of RecordStore for tests and dry runs.
///
/// Records are kept encoded so that reads go through the codec exactly
/// like the filesystem store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    files: BTreeMap<String, String>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts raw file text, bypassing validation
    pub fn with_file(mut self, file: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(file.into(), text.into());
        self
    }

    pub fn record_count(&self) -> usize {
        self.files.len()
    }

    pub fn raw(&self, file: &str) -> Option<&str> {
        self.files.get(file).map(String::as_str)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn list(&self) -> Result<Vec<String>, RecordError> {
        Ok(self.files.keys().rev().cloned().collect())
    }

    fn load_file(&self, file: &str) -> Result<MatchRecord, RecordError> {
        let text = self.files.get(file).ok_or_else(|| RecordError::NotFound {
            file: file.to_string(),
        })?;
        codec::decode(text)
    }

    fn exists(&self, date: &str, opponent: &str) -> Result<bool, RecordError> {
        Ok(self.files.contains_key(&record_file_name(date, opponent)))
    }

    fn save(&mut self, record: &MatchRecord, overwrite: bool) -> Result<String, RecordError> {
        let file = record.file_name()?;
        if self.files.contains_key(&file) && !overwrite {
            return Err(RecordError::DuplicateRecord { file });
        }
        self.files.insert(file.clone(), codec::encode(record)?);
        Ok(file)
    }

    fn save_file(&mut self, file: &str, record: &MatchRecord) -> Result<(), RecordError> {
        let contents = codec::encode(record)?;
        match self.files.get_mut(file) {
            Some(text) => {
                *text = contents;
                Ok(())
            }
            None => Err(RecordError::NotFound {
                file: file.to_string(),
            }),
        }
    }
}
