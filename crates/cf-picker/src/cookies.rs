use anyhow::{Context, Result};
use std::path::Path;

/// Load a Netscape cookies.txt and render it as a `Cookie:` header value.
/// Returns `None` when the file holds no usable cookies.
pub fn cookie_header_from_file(path: &Path) -> Result<Option<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cookie file '{}'", path.display()))?;
    let pairs = parse_netscape(&raw);
    if pairs.is_empty() {
        return Ok(None);
    }
    let header = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");
    Ok(Some(header))
}

/// Netscape format: 7 tab-separated fields per line, `#` comments, with
/// the `#HttpOnly_` prefix marking a real cookie line.
fn parse_netscape(raw: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in raw.lines() {
        let line = line.strip_prefix("#HttpOnly_").unwrap_or(line);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            continue;
        }
        pairs.push((fields[5].to_string(), fields[6].to_string()));
    }
    pairs
}
