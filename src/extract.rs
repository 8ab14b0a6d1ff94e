//! User message extraction
//!
//! Accepts the payload shapes seen from chat clients and the Telex platform,
//! and cleans HTML out of the text.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"(?s)<[^>]*>").expect("valid tag regex");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Decode entities, drop tags, collapse whitespace.
pub fn clean_html_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let unescaped = html_escape::decode_html_entities(raw);
    let without_tags = TAG_RE.replace_all(&unescaped, " ");
    let normalized = without_tags.replace('\u{a0}', " ");

    WHITESPACE_RE.replace_all(&normalized, " ").trim().to_string()
}

/// Pull the user's text out of a request payload. Empty when none is found.
pub fn extract_user_message(payload: &Value) -> String {
    // 1) simple shapes: {"content"}, {"message"}, {"text"}
    for key in ["content", "message", "text"] {
        if let Some(raw) = payload.get(key).and_then(Value::as_str) {
            let cleaned = clean_html_text(raw);
            if !cleaned.is_empty() {
                return cleaned;
            }
        }
    }

    // 2) Telex double nested `messages`, newest entry first
    if let Some(inner) = payload
        .get("messages")
        .and_then(Value::as_array)
        .and_then(|outer| outer.first())
        .and_then(|first| first.get("messages"))
        .and_then(Value::as_array)
    {
        for entry in inner.iter().rev() {
            let raw = ["text", "content", "message"]
                .iter()
                .find_map(|k| entry.get(*k).and_then(Value::as_str));

            if let Some(raw) = raw {
                let cleaned = clean_html_text(raw);
                if !cleaned.is_empty() {
                    return cleaned;
                }
            }
        }
    }

    // 3) last non-empty `text` anywhere in the payload
    let mut found = Vec::new();
    collect_texts(payload, &mut found);
    found
        .last()
        .map(|raw| clean_html_text(raw))
        .unwrap_or_default()
}

fn collect_texts<'a>(value: &'a Value, found: &mut Vec<&'a str>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                match v {
                    Value::String(s) if key == "text" && !s.trim().is_empty() => found.push(s),
                    _ => collect_texts(v, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_texts(item, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_html_text() {
        assert_eq!(clean_html_text("<p>I feel <b>sad</b></p>"), "I feel sad");
        assert_eq!(clean_html_text("  tired&nbsp;and   worn\n out "), "tired and worn out");
        assert_eq!(clean_html_text("&lt;p&gt;hello&lt;/p&gt;"), "hello");
        assert_eq!(clean_html_text("Fish &amp; chips"), "Fish & chips");
        assert_eq!(clean_html_text("   "), "");
    }

    #[test]
    fn test_simple_shapes() {
        assert_eq!(extract_user_message(&json!({"text": "I'm feeling sad today."})), "I'm feeling sad today.");
        assert_eq!(extract_user_message(&json!({"message": "hello"})), "hello");
        assert_eq!(
            extract_user_message(&json!({"kind": "message", "role": "user", "content": "<p>anxious</p>"})),
            "anxious"
        );
    }

    #[test]
    fn test_telex_shape() {
        let payload = json!({
            "messages": [{
                "messages": [
                    {"text": "first"},
                    {"text": "<p>I am stressed</p>"},
                    {"text": "   "}
                ]
            }]
        });
        assert_eq!(extract_user_message(&payload), "I am stressed");
    }

    #[test]
    fn test_recursive_scan() {
        let payload = json!({
            "params": {
                "message": {
                    "parts": [
                        {"kind": "text", "text": "older"},
                        {"kind": "data", "data": [{"text": "I feel lonely"}]}
                    ]
                }
            }
        });
        assert_eq!(extract_user_message(&payload), "I feel lonely");
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract_user_message(&json!({})), "");
        assert_eq!(extract_user_message(&json!({"text": 42})), "");
        assert_eq!(extract_user_message(&json!({"text": "<br/>"})), "");
    }
}
