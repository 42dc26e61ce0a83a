use std::path::Path;

use crate::error::FilterError;

/// Read references, one per line. Lines are trimmed and blank lines dropped;
/// order and duplicates are kept.
pub fn read_references(path: &Path) -> Result<Vec<String>, FilterError> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(FilterError::InputNotFound(display));
    }

    let bytes = std::fs::read(path).map_err(|source| FilterError::InputRead {
        path: display.clone(),
        source,
    })?;

    // Invalid UTF-8 sequences become U+FFFD instead of failing the whole file.
    let references = parse_references(&String::from_utf8_lossy(&bytes));
    if references.is_empty() {
        return Err(FilterError::NoReferences(display));
    }
    Ok(references)
}

pub fn parse_references(content: &str) -> Vec<String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
