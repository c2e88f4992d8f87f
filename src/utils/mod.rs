//! Utility functions and helpers.

pub mod auth;
pub mod dates;
pub mod http;

use serde_json::Value;

/// Render a scalar JSON value as report text.
///
/// Strings pass through, numbers and booleans use their JSON text, anything
/// else (missing, null, arrays, objects) becomes an empty string.
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Follow a chain of object keys, tolerating absence at every level.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Last `/`-separated segment of a URL-like string.
pub fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_scalars() {
        assert_eq!(text(Some(&json!("abc"))), "abc");
        assert_eq!(text(Some(&json!(42))), "42");
        assert_eq!(text(Some(&json!(true))), "true");
        assert_eq!(text(Some(&Value::Null)), "");
        assert_eq!(text(Some(&json!([1, 2]))), "");
        assert_eq!(text(None), "");
    }

    #[test]
    fn test_lookup_tolerates_missing_levels() {
        let v = json!({"a": {"b": {"c": 1}}});
        assert_eq!(lookup(&v, &["a", "b", "c"]), Some(&json!(1)));
        assert_eq!(lookup(&v, &["a", "x", "c"]), None);
        assert_eq!(lookup(&json!("scalar"), &["a"]), None);
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("https://api.example.com/v1/people/123"), "123");
        assert_eq!(last_segment("123"), "123");
        assert_eq!(last_segment(""), "");
    }
}
