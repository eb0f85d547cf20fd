//! Widget schema migration.

use crate::config::WidgetConfig;
use crate::errors::MigrationError;
use crate::registry::WidgetRegistry;
use pagecraft_document::{PageDocument, VisitorMut, WidgetBase};
use tracing::{debug, warn};

/// Outcome of migrating a whole document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    /// Ids of widgets that moved to a newer version
    pub migrated: Vec<String>,
    /// Widgets left at their last good version
    pub failures: Vec<MigrationError>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub(crate) fn migrate_to(
    config: Option<&WidgetConfig>,
    widget: &WidgetBase,
    target: u32,
) -> Result<WidgetBase, MigrationError> {
    let mut current = widget.clone();
    let Some(migrate) = config.and_then(WidgetConfig::migrate_fn) else {
        return Ok(current);
    };

    while current.version < target {
        let next_version = current.version + 1;
        let next = migrate(&current, next_version).map_err(|message| MigrationError::Failed {
            widget_id: current.id.clone(),
            from: current.version,
            to: next_version,
            message,
        })?;

        if next.version <= current.version {
            return Err(MigrationError::Stalled {
                widget_id: current.id.clone(),
                version: current.version,
            });
        }
        if next.version > target {
            return Err(MigrationError::Overshoot {
                widget_id: current.id.clone(),
                version: next.version,
                target,
            });
        }
        current = next;
    }

    Ok(current)
}

struct DocumentMigrator<'a> {
    registry: &'a WidgetRegistry,
    report: MigrationReport,
}

impl VisitorMut for DocumentMigrator<'_> {
    fn visit_widget_mut(&mut self, widget: &mut WidgetBase) {
        let Some(target) = self.registry.current_version(&widget.widget_type) else {
            return;
        };
        if widget.version >= target {
            return;
        }

        match self.registry.migrate_widget(widget, target) {
            Ok(migrated) => {
                if migrated.version != widget.version {
                    debug!(widget_id = %widget.id, from = widget.version, to = migrated.version, "Widget migrated");
                    self.report.migrated.push(widget.id.clone());
                }
                *widget = migrated;
            }
            Err(err) => {
                warn!(widget_id = %widget.id, error = %err, "Widget migration failed - keeping last good version");
                self.report.failures.push(err);
            }
        }
    }
}

pub(crate) fn migrate_document(registry: &WidgetRegistry, page: &mut PageDocument) -> MigrationReport {
    // Walking mutably copies shared sections, so skip documents that are current
    if !page.widgets().any(|w| registry.needs_migration(w)) {
        return MigrationReport::default();
    }

    let mut migrator = DocumentMigrator {
        registry,
        report: MigrationReport::default(),
    };
    migrator.visit_page_mut(page);
    migrator.report
}
