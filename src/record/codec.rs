use super::{Frontmatter, MatchRecord, RecordError};

/// Line that opens and closes the frontmatter block
pub const DELIMITER: &str = "---";

/// Splits a record file into frontmatter and body.
///
/// The first line must be the delimiter and the block runs to the next
/// delimiter line. Everything after that line is the body, byte for byte.
pub fn decode(text: &str) -> Result<MatchRecord, RecordError> {
    let (first, mut rest) = split_line(text)
        .ok_or_else(|| RecordError::malformed("missing opening '---' delimiter"))?;
    if !is_delimiter(first) {
        return Err(RecordError::malformed("missing opening '---' delimiter"));
    }

    let yaml_start = rest;
    let mut yaml_len = 0;
    loop {
        let (line, after) = split_line(rest)
            .ok_or_else(|| RecordError::malformed("missing closing '---' delimiter"))?;
        if is_delimiter(line) {
            let frontmatter = parse_frontmatter(&yaml_start[..yaml_len])?;
            return Ok(MatchRecord::new(frontmatter, after));
        }
        yaml_len += rest.len() - after.len();
        rest = after;
    }
}

/// Renders a record back to file text. Deterministic for equal input.
pub fn encode(record: &MatchRecord) -> Result<String, RecordError> {
    let yaml = serde_yaml::to_string(&record.frontmatter)?;

    let mut out = String::with_capacity(yaml.len() + record.body.len() + 8);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&record.body);
    Ok(out)
}

fn parse_frontmatter(yaml: &str) -> Result<Frontmatter, RecordError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|err| RecordError::malformed(err.to_string()))
}

/// Returns the next line (without its terminator) and the remaining text.
/// `None` once the input is exhausted.
fn split_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    match text.find('\n') {
        Some(idx) => Some((&text[..idx], &text[idx + 1..])),
        None => Some((text, "")),
    }
}

fn is_delimiter(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}
