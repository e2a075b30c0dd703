//! Recursive key search over parsed JSON documents.
//!
//! GeckoTerminal buries the numeric pool id somewhere inside the
//! `__NEXT_DATA__` blob, at a nesting level that moves around between
//! frontend deploys. Rather than chase the exact path we walk the whole
//! tree for the key, depth-capped so a pathological document cannot send
//! us arbitrarily deep.

use serde_json::Value;

/// Depth cap for the recursive search. The id has never been observed
/// deeper than 6 levels; 10 leaves headroom.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Canonical digit-string form of a candidate identifier value.
///
/// Accepts a non-negative integer or a non-empty string of decimal
/// digits. Signed numbers, fractions and mixed strings are rejected.
pub fn as_digit_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n.to_string()),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            Some(s.clone())
        }
        _ => None,
    }
}

/// Find the first value stored under `key` anywhere in `root`, up to
/// `max_depth` levels below the root (the root itself is depth 0).
///
/// Pre-order depth-first: a mapping's own `key` entry is tested before
/// its children, children before siblings, in document order. The first
/// value accepted by [`as_digit_string`] wins and the search stops.
/// A branch that reaches past the depth cap is abandoned without
/// aborting shallower siblings. Returns `None` when nothing matches.
pub fn find_key(root: &Value, key: &str, max_depth: usize) -> Option<String> {
    find_key_by(root, key, max_depth, &as_digit_string)
}

/// [`find_key`] with a caller-supplied extractor in place of the digit
/// heuristic. The extractor both accepts and canonicalizes a candidate.
pub fn find_key_by<F>(root: &Value, key: &str, max_depth: usize, extract: &F) -> Option<String>
where
    F: Fn(&Value) -> Option<String>,
{
    walk(root, key, 0, max_depth, extract)
}

fn walk<F>(node: &Value, key: &str, depth: usize, max_depth: usize, extract: &F) -> Option<String>
where
    F: Fn(&Value) -> Option<String>,
{
    if depth > max_depth {
        return None;
    }
    match node {
        Value::Object(map) => {
            if let Some(found) = map.get(key).and_then(extract) {
                return Some(found);
            }
            map.values()
                .find_map(|child| walk(child, key, depth + 1, max_depth, extract))
        }
        Value::Array(items) => items
            .iter()
            .find_map(|child| walk(child, key, depth + 1, max_depth, extract)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_not_found() {
        let tree = json!({"data": {"other": "147971598"}});
        assert_eq!(find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH), None);
    }

    #[test]
    fn test_finds_nested_digit_string() {
        let tree = json!({"data": {"pool_id": "147971598", "other": 1}});
        assert_eq!(
            find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH),
            Some("147971598".to_string())
        );
    }

    #[test]
    fn test_integer_canonicalizes_to_digit_string() {
        let tree = json!({"pool_id": 12345});
        assert_eq!(
            find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH),
            Some("12345".to_string())
        );
    }

    #[test]
    fn test_rejects_non_digit_values() {
        assert_eq!(as_digit_string(&json!("12a45")), None);
        assert_eq!(as_digit_string(&json!(-5)), None);
        assert_eq!(as_digit_string(&json!("")), None);
        assert_eq!(as_digit_string(&json!(1.5)), None);
        assert_eq!(as_digit_string(&json!(null)), None);
        assert_eq!(as_digit_string(&json!("12345")), Some("12345".to_string()));
        assert_eq!(as_digit_string(&json!(12345)), Some("12345".to_string()));
    }

    #[test]
    fn test_non_matching_value_under_key_is_skipped() {
        // The key exists but holds the wrong shape; a deeper occurrence
        // still gets found.
        let tree = json!({"pool_id": "abc", "inner": {"pool_id": "42"}});
        assert_eq!(
            find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH),
            Some("42".to_string())
        );
    }

    #[test]
    fn test_own_entry_wins_over_descendants() {
        // Pre-order: a mapping's own entry is tested before any child,
        // even a child that appears earlier in document order.
        let tree = json!({"outer": {"pool_id": "111"}, "pool_id": "222"});
        assert_eq!(
            find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH),
            Some("222".to_string())
        );
    }

    #[test]
    fn test_first_branch_in_document_order_wins() {
        let tree = json!({"a": {"pool_id": "1"}, "b": {"pool_id": "2"}});
        assert_eq!(
            find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_depth_bound_is_enforced() {
        // pool_id sits in a mapping at depth 3.
        let tree = json!({"a": {"b": {"c": {"pool_id": 42}}}});
        assert_eq!(find_key(&tree, "pool_id", 2), None);
        assert_eq!(find_key(&tree, "pool_id", 3), Some("42".to_string()));
    }

    #[test]
    fn test_deep_branch_does_not_abort_shallow_sibling() {
        let tree = json!({
            "deep": {"a": {"b": {"c": {"d": {"pool_id": "1"}}}}},
            "shallow": {"pool_id": "7"}
        });
        assert_eq!(find_key(&tree, "pool_id", 2), Some("7".to_string()));
    }

    #[test]
    fn test_descends_into_sequences() {
        let tree = json!([{"x": 1}, {"pool_id": "9"}]);
        assert_eq!(
            find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH),
            Some("9".to_string())
        );
    }

    #[test]
    fn test_degenerate_inputs_yield_not_found() {
        for tree in [json!(null), json!({}), json!([]), json!("x"), json!(3)] {
            assert_eq!(find_key(&tree, "pool_id", DEFAULT_MAX_DEPTH), None);
        }
    }

    #[test]
    fn test_custom_extractor() {
        let tree = json!({"meta": {"channel": "SwapChannel"}});
        let is_channel = |v: &Value| v.as_str().map(str::to_string);
        assert_eq!(
            find_key_by(&tree, "channel", DEFAULT_MAX_DEPTH, &is_channel),
            Some("SwapChannel".to_string())
        );
    }
}
