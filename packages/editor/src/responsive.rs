//! # Responsive Style Editor
//!
//! Edits one widget's per-breakpoint [`StyleSettings`], one breakpoint at a
//! time. Each edit replaces a single sub-object (spacing, border, ...) at the
//! active breakpoint; the other sub-objects and the other breakpoints are
//! left alone. Switching breakpoints never copies values.

use crate::errors::{EditorError, EditorResult};
use crate::mutations::Mutation;
use crate::session::EditorSession;
use pagecraft_document::{
    BackgroundSettings, BorderSettings, Breakpoint, ShadowSettings, SpacingSettings,
    StyleSettings, TypographySettings,
};

/// Replacement for one style sub-object; `None` removes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylePatch {
    Spacing(Option<SpacingSettings>),
    Border(Option<BorderSettings>),
    Typography(Option<TypographySettings>),
    Background(Option<BackgroundSettings>),
    Shadow(Option<ShadowSettings>),
}

impl StylePatch {
    fn apply_to(self, settings: &mut StyleSettings) {
        match self {
            StylePatch::Spacing(v) => settings.spacing = v,
            StylePatch::Border(v) => settings.border = v,
            StylePatch::Typography(v) => settings.typography = v,
            StylePatch::Background(v) => settings.background = v,
            StylePatch::Shadow(v) => settings.shadow = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveStyleEditor {
    widget_id: String,
    breakpoint: Breakpoint,
}

impl ResponsiveStyleEditor {
    pub fn new(widget_id: impl Into<String>, breakpoint: Breakpoint) -> Self {
        Self {
            widget_id: widget_id.into(),
            breakpoint,
        }
    }

    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    /// Settings stored at the active breakpoint (empty when none)
    pub fn current(&self, session: &EditorSession) -> EditorResult<StyleSettings> {
        let widget = session
            .document()
            .widget(&self.widget_id)
            .ok_or_else(|| EditorError::WidgetNotFound(self.widget_id.clone()))?;
        Ok(widget
            .styles
            .as_ref()
            .and_then(|styles| styles.get(self.breakpoint))
            .cloned()
            .unwrap_or_default())
    }

    /// Replace one sub-object at the active breakpoint
    pub fn apply(&self, session: &mut EditorSession, patch: StylePatch) -> EditorResult<()> {
        let widget = session
            .document()
            .widget(&self.widget_id)
            .ok_or_else(|| EditorError::WidgetNotFound(self.widget_id.clone()))?;

        let mut styles = widget.styles.clone().unwrap_or_default();
        let mut settings = styles.get(self.breakpoint).cloned().unwrap_or_default();
        patch.apply_to(&mut settings);
        *styles.slot_mut(self.breakpoint) = (!settings.is_empty()).then_some(settings);

        session.apply(Mutation::SetStyles {
            widget_id: self.widget_id.clone(),
            styles: (!styles.is_empty()).then_some(styles),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EditorOptions;
    use pagecraft_document::PageDocument;
    use std::sync::Arc;

    fn session() -> (EditorSession, String) {
        let registry = Arc::new(pagecraft_registry::initialize().unwrap());
        let doc = PageDocument::empty("page", "Home", "/", "s1", "r1");
        let mut session = EditorSession::new(doc, registry, &EditorOptions::default());
        let id = session.add_widget("text", "r1").unwrap();
        (session, id)
    }

    fn spacing(top: &str) -> SpacingSettings {
        SpacingSettings {
            padding_top: Some(top.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_patch_targets_active_breakpoint_only() {
        let (mut session, id) = session();
        let mut editor = ResponsiveStyleEditor::new(&id, Breakpoint::Sm);
        editor
            .apply(&mut session, StylePatch::Spacing(Some(spacing("8px"))))
            .unwrap();

        editor.set_breakpoint(Breakpoint::Lg);
        assert_eq!(editor.current(&session).unwrap(), StyleSettings::default());

        editor
            .apply(&mut session, StylePatch::Spacing(Some(spacing("32px"))))
            .unwrap();

        let styles = session.document().widget(&id).unwrap().styles.clone().unwrap();
        assert_eq!(styles.get(Breakpoint::Sm).unwrap().spacing, Some(spacing("8px")));
        assert_eq!(styles.get(Breakpoint::Lg).unwrap().spacing, Some(spacing("32px")));
        assert!(styles.get(Breakpoint::Md).is_none());
    }

    #[test]
    fn test_patch_keeps_sibling_sub_objects() {
        let (mut session, id) = session();
        let editor = ResponsiveStyleEditor::new(&id, Breakpoint::Md);
        let border = BorderSettings {
            width: Some("1px".into()),
            ..Default::default()
        };
        editor
            .apply(&mut session, StylePatch::Border(Some(border.clone())))
            .unwrap();
        editor
            .apply(&mut session, StylePatch::Spacing(Some(spacing("4px"))))
            .unwrap();

        let current = editor.current(&session).unwrap();
        assert_eq!(current.border, Some(border));
        assert_eq!(current.spacing, Some(spacing("4px")));
    }

    #[test]
    fn test_clearing_last_value_removes_styles() {
        let (mut session, id) = session();
        let editor = ResponsiveStyleEditor::new(&id, Breakpoint::Sm);
        editor
            .apply(&mut session, StylePatch::Spacing(Some(spacing("8px"))))
            .unwrap();
        editor.apply(&mut session, StylePatch::Spacing(None)).unwrap();
        assert!(session.document().widget(&id).unwrap().styles.is_none());
    }
}
