use crate::workspace::Workspace;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::PageArgs;

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Page id or slug
    pub page: String,

    /// Version id from `pagecraft history`
    pub version: String,
}

pub async fn publish(args: PageArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;
    let page = ws.repository.publish(&page.id).await?;

    let published = page.history.last().map(|event| event.version).unwrap_or_default();
    println!(
        "{} Published {} as version {}",
        "🚀".green(),
        page.name.bright_white().bold(),
        published
    );
    println!("   Live at {}", page.slug);
    Ok(())
}

pub async fn history(args: PageArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;

    println!(
        "{} (draft v{}, {})",
        page.name.bright_white().bold(),
        page.version,
        format!("{:?}", page.status).to_lowercase()
    );
    if page.history.is_empty() {
        println!("   Never published");
        return Ok(());
    }
    for event in page.history.iter().rev() {
        println!(
            "   v{:<4} {}  {}  {}  {}",
            event.version,
            event.created_at.format("%Y-%m-%d %H:%M"),
            event.author_id,
            event.note,
            event.id.dimmed()
        );
    }
    Ok(())
}

pub async fn restore(args: RestoreArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;
    let page = ws.repository.restore_version(&page.id, &args.version).await?;

    println!(
        "{} Restored {} into the draft (now v{})",
        "✓".green(),
        page.name.bright_white(),
        page.version
    );
    println!("   Run `pagecraft publish {}` to make it live", page.slug);
    Ok(())
}

pub async fn storefront(args: PageArgs, cwd: &Path) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let page = ws.find_page(&args.page).await?;
    ws.repository.set_storefront_page(&page.id).await?;
    println!("{} {} now serves the store root", "★".bright_yellow(), page.name.bright_white());
    Ok(())
}
