//! Schema-checked prop edits for the properties panel.

use crate::errors::{EditorError, EditorResult};
use crate::session::EditorSession;
use pagecraft_document::WidgetBase;
use pagecraft_registry::{PropField, RegistryError};
use serde_json::{Map, Value};

impl EditorSession {
    /// Set one prop. The merged props must validate against the widget's schema.
    pub fn set_prop(&mut self, widget_id: &str, key: &str, value: Value) -> EditorResult<()> {
        let mut partial = Map::new();
        partial.insert(key.to_string(), value);
        self.update_widget(widget_id, Value::Object(partial))
    }

    /// Fields a properties panel should offer for the widget
    pub fn editable_fields(&self, widget_id: &str) -> EditorResult<Vec<PropField>> {
        let widget = self
            .document()
            .widget(widget_id)
            .ok_or_else(|| EditorError::WidgetNotFound(widget_id.to_string()))?;
        let config = self
            .registry()
            .get(&widget.widget_type)
            .ok_or_else(|| RegistryError::UnknownWidgetType(widget.widget_type.clone()))?;
        Ok(config.editable_fields())
    }

    pub(crate) fn check_props(&self, widget: &WidgetBase) -> EditorResult<()> {
        match self.registry().validate_props(&widget.widget_type, &widget.props) {
            Ok(()) => Ok(()),
            Err(RegistryError::InvalidProps {
                widget_type,
                errors,
            }) => Err(EditorError::InvalidProps {
                widget_type,
                errors,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::EditorError;
    use crate::session::{EditorOptions, EditorSession};
    use pagecraft_document::PageDocument;
    use pagecraft_registry::FieldKind;
    use serde_json::json;
    use std::sync::Arc;

    fn session_with_button() -> (EditorSession, String) {
        let registry = Arc::new(pagecraft_registry::initialize().unwrap());
        let doc = PageDocument::empty("page", "Home", "/", "s1", "r1");
        let mut session = EditorSession::new(doc, registry, &EditorOptions::default());
        let id = session.add_widget("button", "r1").unwrap();
        (session, id)
    }

    #[test]
    fn test_set_prop_valid() {
        let (mut session, id) = session_with_button();
        session.set_prop(&id, "label", json!("Buy now")).unwrap();
        assert_eq!(session.document().widget(&id).unwrap().props["label"], "Buy now");
    }

    #[test]
    fn test_set_prop_invalid_leaves_document() {
        let (mut session, id) = session_with_button();
        let before = session.document().clone();
        let revision = session.revision();

        let err = session.set_prop(&id, "variant", json!("neon")).unwrap_err();
        assert!(matches!(err, EditorError::InvalidProps { .. }));
        assert_eq!(session.document(), &before);
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn test_editable_fields() {
        let (session, id) = session_with_button();
        let fields = session.editable_fields(&id).unwrap();
        let variant = fields.iter().find(|f| f.name == "variant").unwrap();
        assert!(matches!(variant.kind, FieldKind::Choice(_)));
        assert!(fields.iter().any(|f| f.name == "label" && f.required));
    }
}
