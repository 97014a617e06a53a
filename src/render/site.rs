use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use super::{escape_html, RenderError, Renderer};
use crate::record::{RecordStore, RECORD_EXTENSION};

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub source: String,
    pub path: PathBuf,
}

/// Renders every record to `{output_dir}/{stem}.{ext}` plus an index page
/// linking them newest first.
#[instrument(skip(store, renderer))]
pub fn render_site(
    store: &dyn RecordStore,
    renderer: &dyn Renderer,
    output_dir: &Path,
) -> Result<Vec<RenderedPage>, RenderError> {
    let io_err = |path: &Path, source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(output_dir).map_err(|err| io_err(output_dir, err))?;

    let files = store.list().map_err(RenderError::Listing)?;
    let mut pages = Vec::with_capacity(files.len());
    let mut links = Vec::with_capacity(files.len());

    for file in files {
        let record = store
            .load_file(&file)
            .map_err(|source| RenderError::Record {
                file: file.clone(),
                source,
            })?;

        let stem = file
            .strip_suffix(&format!(".{}", RECORD_EXTENSION))
            .unwrap_or(&file)
            .to_string();
        let page_name = format!("{}.{}", stem, renderer.extension());
        let path = output_dir.join(&page_name);

        fs::write(&path, renderer.render_record(&record)).map_err(|err| io_err(&path, err))?;

        let label = record.frontmatter.title.clone().unwrap_or_else(|| stem.clone());
        links.push((page_name, label));
        pages.push(RenderedPage { source: file, path });
    }

    let index_path = output_dir.join(INDEX_FILE);
    fs::write(&index_path, index_page(&links)).map_err(|err| io_err(&index_path, err))?;

    info!(pages = pages.len(), dir = %output_dir.display(), "Site rendered");
    Ok(pages)
}

fn index_page(links: &[(String, String)]) -> String {
    let items: String = links
        .iter()
        .map(|(href, label)| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape_html(href),
                escape_html(label)
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n<title>比赛记录</title>\n</head>\n<body>\n<ul>\n{}</ul>\n</body>\n</html>\n",
        items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::InMemoryRecordStore;
    use crate::render::HtmlRenderer;
    use tempfile::tempdir;

    #[test]
    fn writes_one_page_per_record_and_an_index() {
        let out = tempdir().unwrap();
        let store = InMemoryRecordStore::new()
            .with_file("2025-01-05-A.md", "---\ntitle: first\n---\nx\n")
            .with_file("2025-01-12-B.md", "---\ntitle: second\n---\ny\n");

        let pages = render_site(&store, &HtmlRenderer::new(), out.path()).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].source, "2025-01-12-B.md");
        assert!(out.path().join("2025-01-12-B.html").is_file());
        assert!(out.path().join("2025-01-05-A.html").is_file());

        let index = fs::read_to_string(out.path().join(INDEX_FILE)).unwrap();
        let second = index.find("second").unwrap();
        let first = index.find("first").unwrap();
        assert!(second < first);
    }

    #[test]
    fn bad_record_names_file() {
        let out = tempdir().unwrap();
        let store = InMemoryRecordStore::new().with_file("2025-01-05-A.md", "oops");

        let result = render_site(&store, &HtmlRenderer::new(), out.path());
        assert!(matches!(result, Err(RenderError::Record { file, .. }) if file == "2025-01-05-A.md"));
    }
}
