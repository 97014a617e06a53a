use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use matchday::{
    photos::photo_dir,
    record::{repository::MATCHES_DIR, FsRecordStore},
    AppConfig,
};

use super::record_builders::RecordFileBuilder;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// A store root on a temp directory, removed on drop
pub struct TestStore {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestStore {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> FsRecordStore {
        FsRecordStore::new(self.root())
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            root: self.root().to_path_buf(),
            ..AppConfig::default()
        }
    }

    pub fn matches_dir(&self) -> PathBuf {
        self.root().join(MATCHES_DIR)
    }

    pub fn read_record(&self, file: &str) -> String {
        fs::read_to_string(self.matches_dir().join(file)).expect("record file should exist")
    }

    pub fn write_raw(&self, file: &str, text: &str) {
        fs::create_dir_all(self.matches_dir()).expect("create matches dir");
        fs::write(self.matches_dir().join(file), text).expect("write record file");
    }

    pub fn add_photo_file(&self, date: &str, name: &str) {
        let dir = photo_dir(self.root(), date);
        fs::create_dir_all(&dir).expect("create photo dir");
        fs::write(dir.join(name), b"jpeg").expect("write photo");
    }
}

pub struct TestStoreBuilder {
    records: Vec<RecordFileBuilder>,
    photos: Vec<(String, String)>,
}

#[allow(dead_code)]
impl TestStoreBuilder {
    pub fn new() -> Self {
        Self {
            records: vec![],
            photos: vec![],
        }
    }

    pub fn with_record(mut self, record: RecordFileBuilder) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_photos(mut self, date: &str, names: &[&str]) -> Self {
        self.photos
            .extend(names.iter().map(|name| (date.to_string(), name.to_string())));
        self
    }

    /// Three matches in January with overlapping rosters
    pub fn with_january_season(self) -> Self {
        self.with_record(
            RecordFileBuilder::new("2025-01-05", "A")
                .attendance(&["东哥", "小王", "辉哥"])
                .mvp("东哥")
                .score("2-1"),
        )
        .with_record(
            RecordFileBuilder::new("2025-01-12", "B")
                .attendance(&["东哥", "小王"])
                .mvp("小王")
                .score("0-0"),
        )
        .with_record(
            RecordFileBuilder::new("2025-01-19", "C")
                .attendance(&["小王", "东哥", "老张"])
                .score("3-3"),
        )
    }

    pub fn build(self) -> TestStore {
        let store = TestStore {
            dir: TempDir::new().expect("create temp dir"),
        };
        for record in self.records {
            let (file, text) = record.render();
            store.write_raw(&file, &text);
        }
        for (date, name) in self.photos {
            store.add_photo_file(&date, &name);
        }
        store
    }
}
