use crate::workspace::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::PageStatus;
use pagecraft_registry::templates::builtin_templates;
use std::path::Path;

use super::PageArgs;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Page name
    pub name: String,

    /// Template id (blank, landing, ...)
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Page id or slug
    pub page: String,

    /// New slug, e.g. /about
    pub slug: String,
}

pub async fn create(args: CreateArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;

    let templates = builtin_templates(&ws.registry)?;
    let template = match &args.template {
        Some(id) => Some(templates.iter().find(|t| &t.id == id).with_context(|| {
            let known: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
            format!("Unknown template '{}' (available: {})", id, known.join(", "))
        })?),
        None => None,
    };

    let page = ws.repository.create_page(&args.name, template).await?;

    println!("{} Created {}", "✓".green(), page.name.bright_white().bold());
    println!("   Id:   {}", page.id);
    println!("   Slug: {}", page.slug);
    Ok(())
}

pub async fn list(cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let pages = ws.repository.list_pages().await?;
    let live = ws.repository.storefront_page().await?.map(|v| v.page_id);

    if pages.is_empty() {
        println!("No pages yet. Run: pagecraft create \"Home\"");
        return Ok(());
    }

    for page in pages {
        let status = match page.status {
            PageStatus::Draft => "draft".yellow(),
            PageStatus::Published => "published".green(),
            PageStatus::Archived => "archived".dimmed(),
        };
        let marker = if live.as_deref() == Some(page.id.as_str()) {
            "★".bright_yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {:<24} {:<20} {:<10} v{}  {}",
            marker,
            page.name.bright_white(),
            page.slug,
            status,
            page.version,
            page.id.dimmed()
        );
    }
    Ok(())
}

pub fn widgets(cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;

    for category in ws.registry.user_categories() {
        println!("{}", category.as_str().bright_blue().bold());
        for config in ws.registry.get_user_widgets_by_category(category) {
            println!(
                "  {:<16} {}  {}",
                config.widget_type.bright_white(),
                config.name,
                config.description.dimmed()
            );
        }
    }
    Ok(())
}

pub async fn slug(args: SlugArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;
    let page = ws.repository.set_slug(&page.id, &args.slug).await?;
    println!("{} {} is now served at {}", "✓".green(), page.name, page.slug.bright_white());
    Ok(())
}

pub async fn archive(args: PageArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;
    let page = ws.repository.archive_page(&page.id).await?;
    println!("{} Archived {}", "✓".green(), page.name);
    Ok(())
}

pub async fn delete(args: PageArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;
    ws.repository.delete_page(&page.id).await?;
    println!("{} Deleted {}", "✓".green(), page.name);
    Ok(())
}
