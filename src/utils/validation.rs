// file: src/utils/validation.rs
// description: configuration and storage-path checks run before queries
// reference: input validation patterns

use crate::error::{AssistantError, Result};
use std::path::Path;

/// Check that the index storage path points at an existing directory.
pub fn ensure_index_dir(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(AssistantError::Validation(format!(
            "Index storage path {} is not a directory",
            path.display()
        ))),
        Err(_) => Err(AssistantError::Validation(format!(
            "Index storage path {} does not exist",
            path.display()
        ))),
    }
}

/// Check that the model API base is an http(s) URL with a host part.
pub fn ensure_api_base(url: &str) -> Result<()> {
    let host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match host {
        Some(rest) if !rest.is_empty() => Ok(()),
        _ => Err(AssistantError::Validation(format!(
            "api_base must be an http(s) URL with a host, got '{}'",
            url
        ))),
    }
}

/// Check that the collection name is usable as a LanceDB table name.
pub fn ensure_collection_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AssistantError::Validation(
            "collection name must not be empty".to_string(),
        ));
    }

    if name.contains('/') || name.contains(char::is_whitespace) {
        return Err(AssistantError::Validation(format!(
            "collection name '{}' must not contain slashes or whitespace",
            name
        )));
    }

    Ok(())
}

/// Shorten passage text for a log line, cutting on a character boundary so
/// multi-byte regulation text never splits mid-character.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
