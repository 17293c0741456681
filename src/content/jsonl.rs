//! Line-delimited JSON

use serde::de::DeserializeOwned;

use crate::error::LoadError;

/// Parse one JSON record per non-blank line; a leading BOM is ignored
pub fn parse_jsonl<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line.trim()).map_err(|source| LoadError::Parse {
                line: i + 1,
                source,
            })
        })
        .collect()
}
