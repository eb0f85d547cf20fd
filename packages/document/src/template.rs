use crate::id_generator::IdGenerator;
use crate::model::{PageDocument, Section};
use pagecraft_common::ThemeTokens;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Starting point for new pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub theme_overrides: ThemeTokens,
}

impl PageTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            sections,
            theme_overrides: ThemeTokens::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Snapshot an existing page as a template
    pub fn from_page(id: impl Into<String>, page: &PageDocument) -> Self {
        Self {
            id: id.into(),
            name: page.name.clone(),
            description: String::new(),
            sections: page.sections.iter().map(|s| s.as_ref().clone()).collect(),
            theme_overrides: page.theme_overrides.clone(),
        }
    }

    /// Copy of the template's sections with fresh ids for every section, row and widget
    pub fn instantiate(&self, ids: &mut IdGenerator) -> Vec<Arc<Section>> {
        self.sections
            .iter()
            .map(|section| {
                let mut section = section.clone();
                section.id = ids.new_id();
                for row in &mut section.rows {
                    row.id = ids.new_id();
                    for widget in &mut row.widgets {
                        widget.id = ids.new_id();
                    }
                }
                Arc::new(section)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, WidgetBase};

    #[test]
    fn test_instantiate_assigns_fresh_ids() {
        let template = PageTemplate::new(
            "landing",
            "Landing",
            vec![Section::new("s").with_row(
                Row::new("r")
                    .with_widget(WidgetBase::new("w1", "hero", 1))
                    .with_widget(WidgetBase::new("w2", "button", 1)),
            )],
        );

        let mut ids = IdGenerator::from_seed("t");
        let first = template.instantiate(&mut ids);
        let second = template.instantiate(&mut ids);

        assert_eq!(first[0].id, "t-1");
        assert_eq!(first[0].rows[0].id, "t-2");
        assert_eq!(first[0].rows[0].widgets[1].id, "t-4");
        assert_ne!(first[0].rows[0].widgets[0].id, second[0].rows[0].widgets[0].id);
        // template untouched
        assert_eq!(template.sections[0].rows[0].widgets[0].id, "w1");
        assert_eq!(first[0].rows[0].widgets[0].widget_type, "hero");
    }
}
