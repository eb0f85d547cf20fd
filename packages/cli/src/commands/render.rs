use crate::workspace::Workspace;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagecraft_document::Breakpoint;
use pagecraft_renderer::{render_page, to_html, HtmlOptions, RenderMode, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Viewport {
    Mobile,
    Tablet,
    Desktop,
}

impl From<Viewport> for Breakpoint {
    fn from(viewport: Viewport) -> Self {
        match viewport {
            Viewport::Mobile => Breakpoint::Sm,
            Viewport::Tablet => Breakpoint::Md,
            Viewport::Desktop => Breakpoint::Lg,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Page id or slug; `/` renders the storefront page
    pub page: String,

    /// Render the working draft instead of the published snapshot
    #[arg(short, long)]
    pub draft: bool,

    /// Include editor affordances (selection, drag handles)
    #[arg(long)]
    pub editor: bool,

    /// Render for a single viewport instead of responsive CSS
    #[arg(short, long, value_enum)]
    pub viewport: Option<Viewport>,

    /// Treat the page as a system page (header/footer unlocked)
    #[arg(long)]
    pub system: bool,

    /// Emit compact HTML
    #[arg(long)]
    pub minify: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;

    let document = if args.draft {
        ws.find_page(&args.page).await?
    } else {
        let version = match ws.repository.published_by_slug(&args.page).await? {
            Some(version) => Some(version),
            None => {
                let page = ws.find_page(&args.page).await?;
                ws.repository.published_page(&page.id).await?
            }
        };
        version
            .with_context(|| format!("'{}' has never been published (use --draft)", args.page))?
            .document
    };

    let options = RenderOptions {
        mode: if args.editor {
            RenderMode::Editor
        } else {
            RenderMode::Storefront
        },
        viewport: args.viewport.map(Breakpoint::from),
        is_system_page: args.system,
        selected: None,
    };
    let rendered = render_page(
        &document,
        &ws.registry,
        &ws.config.theme,
        &ws.config.store_context(),
        &options,
    );

    for diagnostic in &rendered.diagnostics {
        eprintln!("  {} {}", "⚠️".yellow(), diagnostic);
    }

    let html = to_html(
        &rendered,
        &HtmlOptions {
            pretty: !args.minify,
            ..Default::default()
        },
    );

    match args.out {
        Some(path) => {
            fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Rendered {} ({} widgets) → {}",
                "✓".green(),
                document.name.bright_white(),
                rendered.widgets().len(),
                path.display()
            );
        }
        None => print!("{}", html),
    }
    Ok(())
}
