use crate::workspace::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::{validate_document, PageDocument};
use pagecraft_registry::{RegistryError, WidgetRegistry};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Page id or slug
    #[arg(required_unless_present = "file")]
    pub page: Option<String>,

    /// Validate a page document JSON file instead of a stored page
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Every problem with a page: structural issues, unknown widget types, invalid props
pub fn check_page(page: &PageDocument, registry: &WidgetRegistry) -> Vec<String> {
    let mut problems: Vec<String> = validate_document(page)
        .iter()
        .map(ToString::to_string)
        .collect();

    for widget in page.widgets() {
        match registry.validate_props(&widget.widget_type, &widget.props) {
            Ok(()) => {}
            Err(RegistryError::InvalidProps { errors, .. }) => {
                for error in errors {
                    problems.push(format!("Widget {}: {}", widget.id, error));
                }
            }
            Err(err) => problems.push(format!("Widget {}: {}", widget.id, err)),
        }
        if registry.needs_migration(widget) {
            problems.push(format!(
                "Widget {} is at v{} and will be migrated on next save",
                widget.id, widget.version
            ));
        }
    }
    problems
}

pub async fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;

    let page = match (&args.file, &args.page) {
        (Some(path), _) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<PageDocument>(&content)
                .with_context(|| format!("{} is not a page document", path.display()))?
        }
        (None, Some(reference)) => ws.find_page(reference).await?,
        (None, None) => anyhow::bail!("Pass a page or --file"),
    };

    println!("🔍 {} {}", "Validating".green().bold(), page.name);
    let problems = check_page(&page, &ws.registry);

    if problems.is_empty() {
        println!(
            "{} {} widgets in {} sections, no problems",
            "✓".green(),
            page.widget_count(),
            page.sections.len()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("  {} {}", "✗".red(), problem);
    }
    anyhow::bail!("{} problem(s) found", problems.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{Row, Section, WidgetBase};
    use serde_json::json;

    #[test]
    fn test_check_page_reports_each_problem() {
        let registry = pagecraft_registry::initialize().unwrap();
        let mut row = Row::new("r1");
        row.widgets = vec![
            registry.create_widget("button", "a").unwrap(),
            WidgetBase::new("a", "text", 1).with_props(json!({ "content": "dup" })),
            WidgetBase::new("b", "mystery", 1),
            WidgetBase::new("c", "button", 2).with_props(json!({ "label": 5, "href": "#" })),
        ];
        let page = PageDocument::new("p", "Home", "/", vec![Section::new("s").with_row(row)]);

        let problems = check_page(&page, &registry);
        assert!(problems.iter().any(|p| p.contains("Duplicate widget id: a")));
        assert!(problems.iter().any(|p| p.contains("Unknown widget type: mystery")));
        assert!(problems.iter().any(|p| p.starts_with("Widget c:")));
    }

    #[test]
    fn test_clean_page_has_no_problems() {
        let registry = pagecraft_registry::initialize().unwrap();
        let row = Row::new("r1").with_widget(registry.create_widget("hero", "h").unwrap());
        let page = PageDocument::new("p", "Home", "/", vec![Section::new("s").with_row(row)]);
        assert!(check_page(&page, &registry).is_empty());
    }
}
