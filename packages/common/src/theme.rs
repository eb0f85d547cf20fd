use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named color tokens (e.g. `primary` → `#1f6feb`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeTokens {
    tokens: BTreeMap<String, String>,
}

impl ThemeTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tokens every widget may rely on
    pub fn base() -> Self {
        Self::new()
            .with("primary", "#1f2937")
            .with("secondary", "#6b7280")
            .with("accent", "#2563eb")
            .with("background", "#ffffff")
            .with("surface", "#f9fafb")
            .with("text", "#111827")
            .with("muted", "#9ca3af")
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns a copy of `self` with every token of `overrides` laid over it
    pub fn merged_with(&self, overrides: &ThemeTokens) -> ThemeTokens {
        let mut tokens = self.tokens.clone();
        for (name, value) in &overrides.tokens {
            tokens.insert(name.clone(), value.clone());
        }
        ThemeTokens { tokens }
    }

    /// Resolve a token name to its value; anything else (a literal color) passes through
    pub fn resolve<'a>(&'a self, value: &'a str) -> &'a str {
        self.get(value).unwrap_or(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// CSS custom property declarations (`--color-<name>`)
    pub fn css_variables(&self) -> Vec<(String, String)> {
        self.tokens
            .iter()
            .map(|(name, value)| (format!("--color-{}", name), value.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ThemeTokens {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut theme = ThemeTokens::new();
        for (name, value) in iter {
            theme.set(name, value);
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_win() {
        let base = ThemeTokens::base();
        let overrides = ThemeTokens::new().with("primary", "#ff0000").with("brand", "#00ff00");
        let merged = base.merged_with(&overrides);

        assert_eq!(merged.get("primary"), Some("#ff0000"));
        assert_eq!(merged.get("brand"), Some("#00ff00"));
        assert_eq!(merged.get("accent"), base.get("accent"));
        // source untouched
        assert_eq!(base.get("primary"), Some("#1f2937"));
    }

    #[test]
    fn test_resolve_passes_literals_through() {
        let theme = ThemeTokens::base();
        assert_eq!(theme.resolve("accent"), "#2563eb");
        assert_eq!(theme.resolve("#abcdef"), "#abcdef");
    }
}
