use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::{allowed_extension, PhotoAsset, PhotoError};
use crate::record::{photo_path, validate_date};

/// Directory under the store root holding per-date photo folders
pub const PHOTOS_DIR: &str = "photos";

/// Prefix of machine-generated photo names, e.g. `photo-001.jpg`
const GENERATED_PREFIX: &str = "photo-";

pub fn photo_dir(root: &Path, date: &str) -> PathBuf {
    root.join(PHOTOS_DIR).join(date)
}

/// Lists the photos stored for `date`, sorted by filename.
///
/// A missing directory is not an error: it simply has no photos.
#[instrument(skip(root))]
pub fn discover_photos(root: &Path, date: &str) -> Result<Vec<PhotoAsset>, PhotoError> {
    let dir = photo_dir(root, date);
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "No photo directory for date");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dir).map_err(|err| PhotoError::io(&dir, err))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| PhotoError::io(&dir, err))?;
        if !entry.file_type().map(|kind| kind.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if allowed_extension(Path::new(&name)).is_some() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names
        .into_iter()
        .map(|name| {
            let path = photo_path(date, &name);
            PhotoAsset::new(name, path)
        })
        .collect())
}

/// Copies every allowed image below `source` into `photos/{date}/` as
/// `photo-NNN.{ext}`, numbering after the highest existing generated name.
#[instrument(skip(source, root))]
pub fn import_photos(source: &Path, root: &Path, date: &str) -> Result<Vec<PhotoAsset>, PhotoError> {
    validate_date(date).map_err(|_| PhotoError::InvalidDate(date.to_string()))?;

    let mut images = Vec::new();
    collect_images(source, &mut images)?;
    images.sort();

    if images.is_empty() {
        info!(source = %source.display(), "No images found to import");
        return Ok(Vec::new());
    }

    let dest = photo_dir(root, date);
    fs::create_dir_all(&dest).map_err(|err| PhotoError::io(&dest, err))?;

    let mut next = highest_generated_index(&dest)? + 1;
    let mut imported = Vec::with_capacity(images.len());
    for image in images {
        let ext = image
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        let filename = format!("{}{:03}.{}", GENERATED_PREFIX, next, ext);
        let target = dest.join(&filename);

        fs::copy(&image, &target).map_err(|err| PhotoError::io(&image, err))?;
        debug!(from = %image.display(), to = %filename, "Imported photo");

        let path = photo_path(date, &filename);
        imported.push(PhotoAsset::new(filename, path));
        next += 1;
    }

    info!(count = imported.len(), date, "Photos imported");
    Ok(imported)
}

fn collect_images(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PhotoError> {
    let entries = fs::read_dir(dir).map_err(|err| PhotoError::io(dir, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| PhotoError::io(dir, err))?;
        let path = entry.path();
        let kind = entry.file_type().map_err(|err| PhotoError::io(&path, err))?;
        if kind.is_dir() {
            collect_images(&path, out)?;
        } else if kind.is_file() && allowed_extension(&path).is_some() {
            out.push(path);
        }
    }
    Ok(())
}

fn highest_generated_index(dir: &Path) -> Result<u32, PhotoError> {
    let entries = fs::read_dir(dir).map_err(|err| PhotoError::io(dir, err))?;
    let mut highest = 0;
    for entry in entries {
        let entry = entry.map_err(|err| PhotoError::io(dir, err))?;
        let name = entry.file_name();
        let index = name
            .to_str()
            .and_then(|name| name.strip_prefix(GENERATED_PREFIX))
            .and_then(|rest| rest.split('.').next())
            .and_then(|digits| digits.parse::<u32>().ok());
        if let Some(index) = index {
            highest = highest.max(index);
        }
    }
    Ok(highest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"img").unwrap();
    }

    #[test]
    fn discovery_is_sorted_and_filtered() {
        let root = tempdir().unwrap();
        let dir = photo_dir(root.path(), "2025-01-12");
        for name in ["b.png", "a.jpg", "C.JPG", "notes.txt", "clip.mp4"] {
            touch(&dir.join(name));
        }
        fs::create_dir_all(dir.join("sub.jpg")).unwrap();

        let photos = discover_photos(root.path(), "2025-01-12").unwrap();
        let names: Vec<&str> = photos.iter().map(|p| p.filename.as_str()).collect();

        assert_eq!(names, vec!["C.JPG", "a.jpg", "b.png"]);
        assert_eq!(photos[1].path, "photos/2025-01-12/a.jpg");
        assert_eq!(photos[0].extension, "jpg");
    }

    #[test]
    fn missing_directory_yields_no_photos() {
        let root = tempdir().unwrap();
        assert!(discover_photos(root.path(), "2025-01-12").unwrap().is_empty());
    }

    #[test]
    fn import_numbers_after_existing_photos() {
        let root = tempdir().unwrap();
        let source = tempdir().unwrap();
        touch(&photo_dir(root.path(), "2025-01-12").join("photo-004.jpg"));
        touch(&source.path().join("IMG_2.png"));
        touch(&source.path().join("nested/IMG_1.jpg"));
        touch(&source.path().join("readme.txt"));

        let imported = import_photos(source.path(), root.path(), "2025-01-12").unwrap();
        let names: Vec<&str> = imported.iter().map(|p| p.filename.as_str()).collect();

        assert_eq!(names, vec!["photo-005.png", "photo-006.jpg"]);
        assert!(photo_dir(root.path(), "2025-01-12")
            .join("photo-006.jpg")
            .is_file());
    }

    #[test]
    fn import_rejects_bad_date_before_writing() {
        let root = tempdir().unwrap();
        let source = tempdir().unwrap();
        touch(&source.path().join("a.jpg"));

        let result = import_photos(source.path(), root.path(), "2025-13-01");

        assert!(matches!(result, Err(PhotoError::InvalidDate(_))));
        assert!(!root.path().join(PHOTOS_DIR).exists());
    }
}
