use std::fmt::Write;

use super::Renderer;
use crate::record::MatchRecord;

/// Plain, unstyled HTML page for one match
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    club_name: Option<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_club_name(mut self, club_name: impl Into<String>) -> Self {
        self.club_name = Some(club_name.into());
        self
    }

    fn title(record: &MatchRecord) -> String {
        record
            .frontmatter
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "{} {}",
                    record.date().unwrap_or_default(),
                    record.opponent().unwrap_or_default()
                )
                .trim()
                .to_string()
            })
    }

    fn meta_line(record: &MatchRecord) -> String {
        let fm = &record.frontmatter;
        [
            fm.date.as_deref(),
            fm.opponent.as_deref().map(|opponent| opponent.trim()),
            fm.score.as_deref(),
            fm.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
    }
}

impl Renderer for HtmlRenderer {
    fn render_record(&self, record: &MatchRecord) -> String {
        let title = escape_html(&Self::title(record));
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "<!DOCTYPE html>");
        let _ = writeln!(out, "<html lang=\"zh-CN\">");
        let _ = writeln!(out, "<head>");
        let _ = writeln!(out, "<meta charset=\"utf-8\">");
        let _ = writeln!(out, "<title>{title}</title>");
        let _ = writeln!(out, "</head>");
        let _ = writeln!(out, "<body>");
        if let Some(club) = &self.club_name {
            let _ = writeln!(out, "<header>{}</header>", escape_html(club));
        }
        let _ = writeln!(out, "<h1>{title}</h1>");

        let meta = Self::meta_line(record);
        if !meta.is_empty() {
            let _ = writeln!(out, "<p class=\"meta\">{}</p>", escape_html(&meta));
        }
        if let Some(mvp) = record.mvp() {
            let _ = writeln!(out, "<p class=\"mvp\">MVP: {}</p>", escape_html(mvp));
        }

        if !record.scorers().is_empty() {
            let _ = writeln!(out, "<h2>进球</h2>\n<ul class=\"scorers\">");
            for scorer in record.scorers() {
                match scorer.minute {
                    Some(minute) => {
                        let _ = writeln!(out, "<li>{}' {}</li>", minute, escape_html(&scorer.name));
                    }
                    None => {
                        let _ = writeln!(out, "<li>{}</li>", escape_html(&scorer.name));
                    }
                }
            }
            let _ = writeln!(out, "</ul>");
        }

        if !record.attendance().is_empty() {
            let names: Vec<String> = record
                .attendance()
                .iter()
                .map(|name| escape_html(name))
                .collect();
            let _ = writeln!(
                out,
                "<h2>出勤 ({})</h2>\n<p class=\"attendance\">{}</p>",
                names.len(),
                names.join("、")
            );
        }

        for paragraph in paragraphs(&record.body) {
            if paragraph == "---" {
                let _ = writeln!(out, "<hr>");
            } else {
                let lines: Vec<String> = paragraph.lines().map(escape_html).collect();
                let _ = writeln!(out, "<p>{}</p>", lines.join("<br>"));
            }
        }

        if !record.photos().is_empty() {
            let _ = writeln!(out, "<section class=\"photos\">");
            for photo in record.photos() {
                let _ = writeln!(out, "<figure>");
                let _ = writeln!(
                    out,
                    "<img src=\"../{}\" alt=\"{}\">",
                    escape_html(&photo.path),
                    escape_html(&photo.caption)
                );
                if !photo.caption.is_empty() {
                    let _ = writeln!(out, "<figcaption>{}</figcaption>", escape_html(&photo.caption));
                }
                let _ = writeln!(out, "</figure>");
            }
            let _ = writeln!(out, "</section>");
        }

        let _ = writeln!(out, "</body>");
        let _ = writeln!(out, "</html>");
        out
    }
}

/// Blank-line separated blocks with surrounding whitespace removed
fn paragraphs(body: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
