//! JSON Schema wrapper for widget props.

use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Compiled props schema
#[derive(Clone)]
pub struct PropSchema {
    raw: Value,
    validator: Arc<Validator>,
}

impl fmt::Debug for PropSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropSchema").field("raw", &self.raw).finish()
    }
}

impl PropSchema {
    /// Compile a draft 2020-12 schema
    pub fn compile(raw: Value) -> Result<Self, String> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&raw)
            .map_err(|err| err.to_string())?;
        Ok(Self {
            raw,
            validator: Arc::new(validator),
        })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is_valid(&self, props: &Value) -> bool {
        self.validator.is_valid(props)
    }

    /// Every validation message, or `Ok` when `props` conforms
    pub fn validate(&self, props: &Value) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(props)
            .map(|err| err.to_string())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Top-level properties as editor fields, sorted by name
    pub fn fields(&self) -> Vec<PropField> {
        let required: Vec<&str> = self
            .raw
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let Some(properties) = self.raw.get("properties").and_then(Value::as_object) else {
            return vec![];
        };

        properties
            .iter()
            .map(|(name, property)| PropField {
                name: name.clone(),
                title: property
                    .get("title")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                kind: FieldKind::from_schema(property),
                required: required.contains(&name.as_str()),
            })
            .collect()
    }
}

/// One editable prop, derived from the schema
#[derive(Debug, Clone, PartialEq)]
pub struct PropField {
    pub name: String,
    pub title: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
}

/// Input control a properties panel should use for a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Boolean,
    Choice(Vec<String>),
    List,
    Group,
    Unknown,
}

impl FieldKind {
    fn from_schema(property: &Value) -> Self {
        if let Some(options) = property.get("enum").and_then(Value::as_array) {
            return FieldKind::Choice(
                options
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            );
        }
        match property.get("type").and_then(Value::as_str) {
            Some("string") => FieldKind::Text,
            Some("number") => FieldKind::Number,
            Some("integer") => FieldKind::Integer,
            Some("boolean") => FieldKind::Boolean,
            Some("array") => FieldKind::List,
            Some("object") => FieldKind::Group,
            _ => FieldKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PropSchema {
        PropSchema::compile(json!({
            "type": "object",
            "required": ["label"],
            "properties": {
                "label": { "type": "string", "title": "Label" },
                "size": { "enum": ["sm", "lg"] },
                "count": { "type": "integer", "minimum": 1 }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_reports_errors() {
        let schema = sample();
        assert!(schema.validate(&json!({ "label": "ok", "count": 2 })).is_ok());

        let errors = schema.validate(&json!({ "count": 0 })).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_fields_follow_schema() {
        let fields = sample().fields();
        let label = fields.iter().find(|f| f.name == "label").unwrap();
        assert!(label.required);
        assert_eq!(label.title.as_deref(), Some("Label"));
        assert_eq!(label.kind, FieldKind::Text);

        let size = fields.iter().find(|f| f.name == "size").unwrap();
        assert_eq!(size.kind, FieldKind::Choice(vec!["sm".into(), "lg".into()]));
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        assert!(PropSchema::compile(json!({ "type": 12 })).is_err());
    }
}
