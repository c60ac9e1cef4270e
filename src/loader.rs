// Tag list loading

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One entry of the `tags` list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Input document: `{ tags: [ { name: ... }, ... ] }`
#[derive(Debug, Deserialize)]
struct TagFile {
    tags: Vec<Tag>,
}

/// Read and parse a YAML (or JSON) tag list from disk.
pub fn load_tags(path: &Path) -> Result<Vec<Tag>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::LoadError(format!("{}: {}", path.display(), e)))?;

    let tags = parse_tags(&content)
        .map_err(|e| AppError::LoadError(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), count = tags.len(), "Loaded tag list");
    Ok(tags)
}

/// Parse a tag list already held in memory.
///
/// Names are passed through untouched. Names that would need escaping in a
/// URL are only reported in the log.
pub fn parse_tags(content: &str) -> std::result::Result<Vec<Tag>, String> {
    let file: TagFile =
        serde_yaml::from_str(content).map_err(|e| format!("Invalid tag file: {}", e))?;

    for tag in &file.tags {
        if tag.name.is_empty() {
            warn!("Tag with an empty name");
        } else if !is_url_safe(&tag.name) {
            warn!(name = %tag.name, "Tag name contains characters that are not URL-safe");
        }
    }

    Ok(file.tags)
}

/// RFC 3986 unreserved characters only
fn is_url_safe(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}
