//! # Document Mutations
//!
//! Semantic operations on a [`PageDocument`]. Every mutation addresses its
//! targets by id and is validated before anything is written, so a rejected
//! mutation never leaves a partial edit behind.
//!
//! ### Move
//! - The widget is removed from every row that holds it, then appended (or
//!   inserted) in the target row
//! - An unknown target row rejects the whole move; the widget stays put
//!
//! ### Reorder
//! - Both widgets must share a row; the dragged widget takes the target's index
//!
//! ### Delete
//! - Deleting a section or row removes everything inside it

use crate::errors::MutationError;
use pagecraft_document::{
    ColSpan, PageDocument, ResponsiveSettings, Row, RowAlignment, Section, SectionBackground,
    Visibility, WidgetBase, GRID_COLUMNS,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Section metadata change. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    pub title: Option<String>,
    pub background: Option<SectionBackground>,
    pub padding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Move `widget_id` to the index of `target_id` inside their shared row
    #[serde(rename_all = "camelCase")]
    ReorderWidget { widget_id: String, target_id: String },

    /// Relocate a widget into `row_id` (appended when `index` is `None`)
    #[serde(rename_all = "camelCase")]
    MoveWidget {
        widget_id: String,
        row_id: String,
        index: Option<usize>,
    },

    #[serde(rename_all = "camelCase")]
    InsertWidget {
        row_id: String,
        index: Option<usize>,
        widget: WidgetBase,
    },

    /// Shallow-merge `props` into the widget's props
    #[serde(rename_all = "camelCase")]
    UpdateWidgetProps { widget_id: String, props: Value },

    #[serde(rename_all = "camelCase")]
    SetColSpan { widget_id: String, col_span: ColSpan },

    #[serde(rename_all = "camelCase")]
    SetVisibility {
        widget_id: String,
        visibility: Visibility,
    },

    #[serde(rename_all = "camelCase")]
    SetStyles {
        widget_id: String,
        styles: Option<ResponsiveSettings>,
    },

    #[serde(rename_all = "camelCase")]
    SetCustomCss {
        widget_id: String,
        css: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    DeleteWidget { widget_id: String },

    /// Insert a copy of `widget_id` named `new_id` right after the original
    #[serde(rename_all = "camelCase")]
    DuplicateWidget { widget_id: String, new_id: String },

    AddSection { section: Section, index: Option<usize> },

    #[serde(rename_all = "camelCase")]
    AddRow {
        section_id: String,
        row: Row,
        index: Option<usize>,
    },

    #[serde(rename_all = "camelCase")]
    DeleteSection { section_id: String },

    #[serde(rename_all = "camelCase")]
    DeleteRow { row_id: String },

    #[serde(rename_all = "camelCase")]
    MoveSection { section_id: String, index: usize },

    #[serde(rename_all = "camelCase")]
    UpdateSection {
        section_id: String,
        patch: SectionPatch,
    },

    #[serde(rename_all = "camelCase")]
    UpdateRow {
        row_id: String,
        alignment: Option<RowAlignment>,
        gap: Option<String>,
    },
}

impl Mutation {
    /// Short label for undo menus
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::ReorderWidget { .. } => "Reorder widget",
            Mutation::MoveWidget { .. } => "Move widget",
            Mutation::InsertWidget { .. } => "Add widget",
            Mutation::UpdateWidgetProps { .. } => "Edit widget",
            Mutation::SetColSpan { .. } => "Resize widget",
            Mutation::SetVisibility { .. } => "Change visibility",
            Mutation::SetStyles { .. } => "Change style",
            Mutation::SetCustomCss { .. } => "Edit custom CSS",
            Mutation::DeleteWidget { .. } => "Delete widget",
            Mutation::DuplicateWidget { .. } => "Duplicate widget",
            Mutation::AddSection { .. } => "Add section",
            Mutation::AddRow { .. } => "Add row",
            Mutation::DeleteSection { .. } => "Delete section",
            Mutation::DeleteRow { .. } => "Delete row",
            Mutation::MoveSection { .. } => "Move section",
            Mutation::UpdateSection { .. } => "Edit section",
            Mutation::UpdateRow { .. } => "Edit row",
        }
    }

    /// Check the mutation against `doc` without changing it
    pub fn validate(&self, doc: &PageDocument) -> Result<(), MutationError> {
        match self {
            Mutation::ReorderWidget {
                widget_id,
                target_id,
            } => {
                let from = find_widget(doc, widget_id)?;
                let to = find_widget(doc, target_id)?;
                if from.row_location() != to.row_location() {
                    return Err(MutationError::NotSameRow(
                        widget_id.clone(),
                        target_id.clone(),
                    ));
                }
                if from.index == to.index {
                    return Err(MutationError::Unchanged);
                }
                Ok(())
            }

            Mutation::MoveWidget {
                widget_id, row_id, ..
            } => {
                find_widget(doc, widget_id)?;
                find_row(doc, row_id)?;
                Ok(())
            }

            Mutation::InsertWidget { row_id, widget, .. } => {
                find_row(doc, row_id)?;
                ensure_free(doc, &widget.id)?;
                check_col_span(&widget.col_span)
            }

            Mutation::SetColSpan {
                widget_id,
                col_span,
            } => {
                find_widget(doc, widget_id)?;
                check_col_span(col_span)
            }

            Mutation::UpdateWidgetProps { widget_id, .. }
            | Mutation::SetVisibility { widget_id, .. }
            | Mutation::SetStyles { widget_id, .. }
            | Mutation::SetCustomCss { widget_id, .. }
            | Mutation::DeleteWidget { widget_id } => find_widget(doc, widget_id).map(|_| ()),

            Mutation::DuplicateWidget { widget_id, new_id } => {
                find_widget(doc, widget_id)?;
                ensure_free(doc, new_id)
            }

            Mutation::AddSection { section, .. } => {
                ensure_free(doc, &section.id)?;
                for row in &section.rows {
                    ensure_row_free(doc, row)?;
                }
                Ok(())
            }

            Mutation::AddRow {
                section_id, row, ..
            } => {
                find_section(doc, section_id)?;
                ensure_row_free(doc, row)
            }

            Mutation::DeleteSection { section_id }
            | Mutation::MoveSection { section_id, .. }
            | Mutation::UpdateSection { section_id, .. } => {
                find_section(doc, section_id).map(|_| ())
            }

            Mutation::DeleteRow { row_id } | Mutation::UpdateRow { row_id, .. } => {
                find_row(doc, row_id).map(|_| ())
            }
        }
    }

    /// Validate, then apply to `doc`
    pub fn apply(&self, doc: &mut PageDocument) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::ReorderWidget {
                widget_id,
                target_id,
            } => Self::apply_reorder(doc, widget_id, target_id),

            Mutation::MoveWidget {
                widget_id,
                row_id,
                index,
            } => Self::apply_move(doc, widget_id, row_id, *index),

            Mutation::InsertWidget {
                row_id,
                index,
                widget,
            } => {
                let row = doc
                    .row_mut(row_id)
                    .ok_or_else(|| MutationError::RowNotFound(row_id.clone()))?;
                insert_at(&mut row.widgets, *index, widget.clone());
                Ok(())
            }

            Mutation::UpdateWidgetProps { widget_id, props } => {
                widget_mut(doc, widget_id)?.merge_props(props);
                Ok(())
            }

            Mutation::SetColSpan {
                widget_id,
                col_span,
            } => {
                widget_mut(doc, widget_id)?.col_span = col_span.clone();
                Ok(())
            }

            Mutation::SetVisibility {
                widget_id,
                visibility,
            } => {
                widget_mut(doc, widget_id)?.visibility = visibility.clone();
                Ok(())
            }

            Mutation::SetStyles { widget_id, styles } => {
                widget_mut(doc, widget_id)?.styles = styles.clone();
                Ok(())
            }

            Mutation::SetCustomCss { widget_id, css } => {
                widget_mut(doc, widget_id)?.custom_css = css.clone();
                Ok(())
            }

            Mutation::DeleteWidget { widget_id } => {
                Self::remove_widget(doc, widget_id)?;
                Ok(())
            }

            Mutation::DuplicateWidget { widget_id, new_id } => {
                let location = find_widget(doc, widget_id)?;
                let row = doc
                    .row_at_mut(location.row_location())
                    .ok_or_else(|| MutationError::WidgetNotFound(widget_id.clone()))?;
                let mut copy = row.widgets[location.index].clone();
                copy.id = new_id.clone();
                row.widgets.insert(location.index + 1, copy);
                Ok(())
            }

            Mutation::AddSection { section, index } => {
                insert_at(&mut doc.sections, *index, Arc::new(section.clone()));
                Ok(())
            }

            Mutation::AddRow {
                section_id,
                row,
                index,
            } => {
                let section = doc
                    .section_mut(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                insert_at(&mut section.rows, *index, row.clone());
                Ok(())
            }

            Mutation::DeleteSection { section_id } => {
                let index = find_section(doc, section_id)?;
                doc.sections.remove(index);
                Ok(())
            }

            Mutation::DeleteRow { row_id } => {
                let location = find_row(doc, row_id)?;
                if let Some(section) = doc.section_at_mut(location.section) {
                    section.rows.remove(location.row);
                }
                Ok(())
            }

            Mutation::MoveSection { section_id, index } => {
                let from = find_section(doc, section_id)?;
                let section = doc.sections.remove(from);
                let to = (*index).min(doc.sections.len());
                doc.sections.insert(to, section);
                Ok(())
            }

            Mutation::UpdateSection { section_id, patch } => {
                let section = doc
                    .section_mut(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                if let Some(title) = &patch.title {
                    section.title = Some(title.clone());
                }
                if let Some(background) = &patch.background {
                    section.background = background.clone();
                }
                if let Some(padding) = &patch.padding {
                    section.padding = padding.clone();
                }
                Ok(())
            }

            Mutation::UpdateRow {
                row_id,
                alignment,
                gap,
            } => {
                let row = doc
                    .row_mut(row_id)
                    .ok_or_else(|| MutationError::RowNotFound(row_id.clone()))?;
                row.alignment = *alignment;
                row.gap = gap.clone();
                Ok(())
            }
        }
    }

    fn apply_reorder(
        doc: &mut PageDocument,
        widget_id: &str,
        target_id: &str,
    ) -> Result<(), MutationError> {
        let from = find_widget(doc, widget_id)?;
        let to = find_widget(doc, target_id)?;
        let row = doc
            .row_at_mut(from.row_location())
            .ok_or_else(|| MutationError::WidgetNotFound(widget_id.to_string()))?;
        let widget = row.widgets.remove(from.index);
        row.widgets.insert(to.index, widget);
        Ok(())
    }

    fn apply_move(
        doc: &mut PageDocument,
        widget_id: &str,
        row_id: &str,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        let widget = Self::remove_widget(doc, widget_id)?;
        let row = doc
            .row_mut(row_id)
            .ok_or_else(|| MutationError::RowNotFound(row_id.to_string()))?;
        insert_at(&mut row.widgets, index, widget);
        Ok(())
    }

    /// Remove `widget_id` from every row holding it and return the first copy
    fn remove_widget(doc: &mut PageDocument, widget_id: &str) -> Result<WidgetBase, MutationError> {
        let mut removed = None;
        while let Some(location) = doc.locate_widget(widget_id) {
            let Some(row) = doc.row_at_mut(location.row_location()) else {
                break;
            };
            let widget = row.widgets.remove(location.index);
            removed.get_or_insert(widget);
        }
        removed.ok_or_else(|| MutationError::WidgetNotFound(widget_id.to_string()))
    }
}

fn insert_at<T>(items: &mut Vec<T>, index: Option<usize>, item: T) {
    let at = index.map_or(items.len(), |i| i.min(items.len()));
    items.insert(at, item);
}

fn find_widget(
    doc: &PageDocument,
    widget_id: &str,
) -> Result<pagecraft_document::WidgetLocation, MutationError> {
    doc.locate_widget(widget_id)
        .ok_or_else(|| MutationError::WidgetNotFound(widget_id.to_string()))
}

fn find_row(
    doc: &PageDocument,
    row_id: &str,
) -> Result<pagecraft_document::RowLocation, MutationError> {
    doc.locate_row(row_id)
        .ok_or_else(|| MutationError::RowNotFound(row_id.to_string()))
}

fn find_section(doc: &PageDocument, section_id: &str) -> Result<usize, MutationError> {
    doc.section_index(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn widget_mut<'a>(
    doc: &'a mut PageDocument,
    widget_id: &str,
) -> Result<&'a mut WidgetBase, MutationError> {
    doc.widget_mut(widget_id)
        .ok_or_else(|| MutationError::WidgetNotFound(widget_id.to_string()))
}

fn ensure_free(doc: &PageDocument, id: &str) -> Result<(), MutationError> {
    if doc.contains_id(id) {
        Err(MutationError::DuplicateId(id.to_string()))
    } else {
        Ok(())
    }
}

fn ensure_row_free(doc: &PageDocument, row: &Row) -> Result<(), MutationError> {
    ensure_free(doc, &row.id)?;
    for widget in &row.widgets {
        ensure_free(doc, &widget.id)?;
        check_col_span(&widget.col_span)?;
    }
    Ok(())
}

fn check_col_span(col_span: &ColSpan) -> Result<(), MutationError> {
    for (breakpoint, value) in col_span.iter() {
        if *value == 0 || *value > GRID_COLUMNS {
            return Err(MutationError::ColSpanOutOfRange {
                breakpoint: breakpoint.to_string(),
                value: *value,
            });
        }
    }
    Ok(())
}
