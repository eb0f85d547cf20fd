//! Store-name placeholders in widget props.

use serde_json::Value;

pub const STORE_NAME_PLACEHOLDER: &str = "{{store_name}}";

/// Default copy older templates shipped with
pub const LEGACY_STORE_NAME: &str = "Your Store";

/// Copy of `props` with every store-name placeholder replaced by `store_name`.
///
/// The source value is never modified.
pub fn substitute_store_name(props: &Value, store_name: &str) -> Value {
    match props {
        Value::String(s) => Value::String(replace_in(s, store_name)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute_store_name(item, store_name))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_store_name(v, store_name)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Single left-to-right pass; substituted text is never scanned again
fn replace_in(text: &str, store_name: &str) -> String {
    if !text.contains(STORE_NAME_PLACEHOLDER) && !text.contains(LEGACY_STORE_NAME) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some(tail) = rest
            .strip_prefix(STORE_NAME_PLACEHOLDER)
            .or_else(|| rest.strip_prefix(LEGACY_STORE_NAME))
        {
            out.push_str(store_name);
            rest = tail;
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}
