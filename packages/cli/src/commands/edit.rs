use crate::workspace::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::{Breakpoint, ColSpan};
use pagecraft_editor::{save_if_dirty, EditorSession};
use serde_json::Value;
use std::path::Path;
use tokio::sync::Mutex;

#[derive(Args, Debug)]
pub struct AddWidgetArgs {
    /// Page id or slug
    pub page: String,

    /// Widget type, see `pagecraft widgets`
    pub widget_type: String,

    /// Target row id (default: last row of the page)
    #[arg(short, long)]
    pub row: Option<String>,

    /// Put the widget in a new row at the end of the last section
    #[arg(long, conflicts_with = "row")]
    pub new_row: bool,

    /// Column spans, e.g. `sm=12,lg=6`
    #[arg(short, long)]
    pub span: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetPropArgs {
    /// Page id or slug
    pub page: String,

    pub widget_id: String,

    /// Prop name; omit to list the widget's editable props
    pub key: Option<String>,

    /// JSON value; anything that is not valid JSON is taken as a string
    pub value: Option<String>,
}

async fn open_session(ws: &Workspace, reference: &str) -> Result<EditorSession> {
    let page = ws.find_page(reference).await?;
    Ok(EditorSession::new(
        page,
        ws.registry.clone(),
        &ws.config.editor_options(),
    ))
}

async fn save(ws: &Workspace, session: EditorSession) -> Result<()> {
    let session = Mutex::new(session);
    let Some(report) = save_if_dirty(&session, &ws.repository).await? else {
        println!("Nothing to save");
        return Ok(());
    };

    for failure in &report.migration.failures {
        println!("  {} {}", "⚠️".yellow(), failure);
    }
    println!(
        "{} Saved draft of {} (v{})",
        "✓".green(),
        report.page.name.bright_white(),
        report.page.version
    );
    Ok(())
}

pub async fn add_widget(args: AddWidgetArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let mut session = open_session(&ws, &args.page).await?;

    let col_span = args.span.as_deref().map(parse_col_span).transpose()?;

    let row_id = match args.row {
        Some(row) => row,
        None => target_row(&mut session, args.new_row)?,
    };

    let widget_id = session
        .add_widget(&args.widget_type, &row_id)
        .with_context(|| format!("Cannot add '{}' to row {}", args.widget_type, row_id))?;
    if let Some(col_span) = col_span {
        session.set_col_span(&widget_id, col_span)?;
    }

    println!(
        "{} Added {} {} to row {}",
        "✓".green(),
        args.widget_type.bright_white(),
        widget_id,
        row_id
    );
    save(&ws, session).await
}

pub async fn set_prop(args: SetPropArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let mut session = open_session(&ws, &args.page).await?;

    let Some(key) = args.key else {
        for field in session.editable_fields(&args.widget_id)? {
            let required = if field.required { " (required)".red().to_string() } else { String::new() };
            println!(
                "  {:<16} {:?}  {}{}",
                field.name.bright_white(),
                field.kind,
                field.title.unwrap_or_default().dimmed(),
                required
            );
        }
        return Ok(());
    };

    let raw = args.value.context("Missing value")?;
    let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
    session.set_prop(&args.widget_id, &key, value)?;

    println!("{} Set {}.{}", "✓".green(), args.widget_id, key);
    save(&ws, session).await
}

/// Last row of the page, or a fresh row at the end of the last section
fn target_row(session: &mut EditorSession, new_row: bool) -> Result<String> {
    let last_section = session.document().sections.last().map(|s| s.id.clone());
    let last_row = session.document().rows().last().map(|r| r.id.clone());

    match (last_section, last_row) {
        (Some(_), Some(row)) if !new_row => Ok(row),
        (Some(section), _) => Ok(session.add_row(&section)?),
        (None, _) => {
            let section = session.add_section(None)?;
            let row = session
                .document()
                .section(&section)
                .and_then(|s| s.rows.first())
                .map(|row| row.id.clone())
                .context("New section has no row")?;
            Ok(row)
        }
    }
}

/// Parse `sm=12,lg=6` into a column span
pub fn parse_col_span(spec: &str) -> Result<ColSpan> {
    let mut col_span = ColSpan::empty();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (bp, value) = part
            .split_once('=')
            .with_context(|| format!("Expected <breakpoint>=<columns>, found '{}'", part))?;
        let bp: Breakpoint = bp.trim().parse().map_err(anyhow::Error::msg)?;
        let value: u8 = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid column count '{}'", value))?;
        col_span.set(bp, value);
    }
    Ok(col_span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_col_span() {
        let span = parse_col_span("sm=12, lg=6").unwrap();
        assert_eq!(span.get(Breakpoint::Sm), Some(&12));
        assert_eq!(span.get(Breakpoint::Md), None);
        assert_eq!(span.get(Breakpoint::Lg), Some(&6));

        assert!(parse_col_span("xl=3").is_err());
        assert!(parse_col_span("lg").is_err());
        assert!(parse_col_span("lg=wide").is_err());
    }
}
