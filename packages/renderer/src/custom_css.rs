//! Scoping of per-widget custom CSS.
//!
//! Two forms are accepted:
//!
//! ```text
//! color: red; padding: 4px         → #pc-w-<id> { color: red; padding: 4px }
//! h2, p { color: red }             → #pc-w-<id> h2, #pc-w-<id> p { color: red }
//! &:hover { opacity: 0.8 }         → #pc-w-<id>:hover { opacity: 0.8 }
//! ```
//!
//! At-rules are not supported.

use pagecraft_common::CssRule;
use std::collections::BTreeMap;

/// Rules for `css`, every selector prefixed with `scope`
pub fn scope_custom_css(scope: &str, css: &str) -> Result<Vec<CssRule>, String> {
    let css = strip_comments(css)?;
    if css.contains('@') {
        return Err("at-rules are not supported".to_string());
    }
    if !css.contains('{') {
        if css.contains('}') {
            return Err("unbalanced '}'".to_string());
        }
        let properties = parse_declarations(&css)?;
        if properties.is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![CssRule {
            selector: scope.to_string(),
            properties,
            media_query: None,
        }]);
    }

    let mut rules = Vec::new();
    let mut rest = css.as_str();
    loop {
        let Some(open) = rest.find('{') else {
            if rest.trim().is_empty() {
                break;
            }
            return Err(format!("unexpected text '{}'", rest.trim()));
        };
        let selector = rest[..open].trim();
        if selector.is_empty() {
            return Err("rule without selector".to_string());
        }
        if selector.contains('}') {
            return Err("unbalanced '}'".to_string());
        }
        let body_start = open + 1;
        let close = rest[body_start..]
            .find('}')
            .map(|offset| body_start + offset)
            .ok_or_else(|| format!("unclosed block after '{}'", selector))?;
        let body = &rest[body_start..close];
        if body.contains('{') {
            return Err("nested blocks are not supported".to_string());
        }

        rules.push(CssRule {
            selector: scope_selector(scope, selector),
            properties: parse_declarations(body)?,
            media_query: None,
        });
        rest = &rest[close + 1..];
    }
    Ok(rules)
}

fn scope_selector(scope: &str, selector: &str) -> String {
    selector
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_prefix('&') {
            Some(rest) => format!("{}{}", scope, rest),
            None => format!("{} {}", scope, part),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_declarations(body: &str) -> Result<BTreeMap<String, String>, String> {
    let mut properties = BTreeMap::new();
    for declaration in body.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let (name, value) = declaration
            .split_once(':')
            .ok_or_else(|| format!("expected 'property: value', found '{}'", declaration))?;
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            return Err(format!("incomplete declaration '{}'", declaration));
        }
        properties.insert(name.to_string(), value.to_string());
    }
    Ok(properties)
}

fn strip_comments(css: &str) -> Result<String, String> {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let end = rest[start + 2..]
            .find("*/")
            .ok_or_else(|| "unterminated comment".to_string())?;
        rest = &rest[start + 2 + end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_declarations_become_one_rule() {
        let rules = scope_custom_css("#pc-w-a", "color: red; padding: 4px;").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, "#pc-w-a");
        assert_eq!(rules[0].properties.get("color").map(String::as_str), Some("red"));
        assert_eq!(rules[0].properties.get("padding").map(String::as_str), Some("4px"));
    }

    #[test]
    fn test_rule_blocks_are_prefixed() {
        let css = "/* heading */ h2, p { color: red } &:hover { opacity: 0.8 }";
        let rules = scope_custom_css("#pc-w-a", css).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector, "#pc-w-a h2, #pc-w-a p");
        assert_eq!(rules[1].selector, "#pc-w-a:hover");
    }

    #[test]
    fn test_rejects_malformed_css() {
        assert!(scope_custom_css("#x", "color red").is_err());
        assert!(scope_custom_css("#x", "h2 { color: red").is_err());
        assert!(scope_custom_css("#x", "@media (min-width: 1px) { a { b: c } }").is_err());
        assert!(scope_custom_css("#x", "color: red }").is_err());
        assert!(scope_custom_css("#x", "   ").unwrap().is_empty());
    }
}
