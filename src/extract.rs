//! Pool id extraction strategies.
//!
//! Two independent strategies over a fetched document, tried in a fixed
//! order: parse the embedded `__NEXT_DATA__` JSON and search it, then
//! fall back to a literal text scan. Each strategy is a pure function
//! returning `Option`; neither one ever propagates a parse failure.

use regex::Regex;
use serde_json::Value;

use crate::search;

/// Key the GeckoTerminal frontend uses for the numeric identifier.
pub const POOL_ID_KEY: &str = "pool_id";

const NEXT_DATA_MARKER: &str = "__NEXT_DATA__";

/// Structured strategy: slice the `__NEXT_DATA__` payload out of the
/// page, parse it and run the recursive key search. A page without the
/// marker, or with a payload that does not parse, yields `None`.
pub fn embedded_json(html: &str, key: &str, max_depth: usize) -> Option<String> {
    let payload = next_data_payload(html)?;
    let tree: Value = serde_json::from_str(payload).ok()?;
    search::find_key(&tree, key, max_depth)
}

/// The payload sits between the first `{` after the marker and the
/// closing script tag.
fn next_data_payload(html: &str) -> Option<&str> {
    let marker = html.find(NEXT_DATA_MARKER)?;
    let start = marker + html[marker..].find('{')?;
    let end = start + html[start..].find("</script>")?;
    Some(&html[start..end])
}

/// Fallback strategy: scan the raw text for `"key": "12345"` or a bare
/// `"key": 12345`. A quoted value must be all digits up to its closing
/// quote; a mixed value like `"12a45"` is not an identifier.
pub fn regex_scan(text: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r#""{}"\s*:\s*(?:"(\d+)"|(\d+)(?:[,}}\s]|$))"#,
        regex::escape(key)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(text).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// Strategy chain for one fetched page: structured search first, regex
/// fallback second.
pub fn extract_pool_id(html: &str, key: &str, max_depth: usize) -> Option<String> {
    embedded_json(html, key, max_depth).or_else(|| regex_scan(html, key))
}

/// Search one outbound cable frame for a subscribe command whose channel
/// identifier carries `key`. ActionCable double-encodes the identifier
/// as a JSON string inside the frame.
pub fn pool_id_from_frame(payload: &str, key: &str, max_depth: usize) -> Option<String> {
    let frame: Value = serde_json::from_str(payload).ok()?;
    if frame.get("command").and_then(Value::as_str) != Some("subscribe") {
        return None;
    }
    let identifier = frame.get("identifier").and_then(Value::as_str)?;
    match serde_json::from_str::<Value>(identifier) {
        Ok(tree) => {
            search::find_key(&tree, key, max_depth).or_else(|| regex_scan(identifier, key))
        }
        Err(_) => regex_scan(identifier, key),
    }
}

/// First match across a captured sequence of outbound frames.
pub fn pool_id_from_frames<'a, I>(frames: I, key: &str, max_depth: usize) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    frames
        .into_iter()
        .find_map(|frame| pool_id_from_frame(frame, key, max_depth))
}
