mod commands;
mod config;
mod workspace;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    AddWidgetArgs, CreateArgs, InitArgs, PageArgs, RenderArgs, RestoreArgs, SetPropArgs, SlugArgs,
    ValidateArgs,
};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - storefront page builder
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a Pagecraft store in the current directory
    Init(InitArgs),

    /// Create a draft page
    Create(CreateArgs),

    /// List pages
    List,

    /// List the widgets available to editors
    Widgets,

    /// Append a widget to a page's draft
    AddWidget(AddWidgetArgs),

    /// Set one prop of a widget in a page's draft
    SetProp(SetPropArgs),

    /// Render a page to HTML
    Render(RenderArgs),

    /// Publish the current draft of a page
    Publish(PageArgs),

    /// Show a page's publish history
    History(PageArgs),

    /// Restore a published version into the draft
    Restore(RestoreArgs),

    /// Serve a page at the store root
    Storefront(PageArgs),

    /// Change a page's URL slug
    Slug(SlugArgs),

    /// Archive a page
    Archive(PageArgs),

    /// Delete a page and its versions
    Delete(PageArgs),

    /// Check a page against document invariants and widget schemas
    Validate(ValidateArgs),
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Command, cwd: &Path) -> anyhow::Result<()> {
    match command {
        Command::Init(args) => commands::init(args, cwd),
        Command::Create(args) => commands::create(args, cwd).await,
        Command::List => commands::list(cwd).await,
        Command::Widgets => commands::widgets(cwd),
        Command::AddWidget(args) => commands::add_widget(args, cwd).await,
        Command::SetProp(args) => commands::set_prop(args, cwd).await,
        Command::Render(args) => commands::render(args, cwd).await,
        Command::Publish(args) => commands::publish(args, cwd).await,
        Command::History(args) => commands::history(args, cwd).await,
        Command::Restore(args) => commands::restore(args, cwd).await,
        Command::Storefront(args) => commands::storefront(args, cwd).await,
        Command::Slug(args) => commands::slug(args, cwd).await,
        Command::Archive(args) => commands::archive(args, cwd).await,
        Command::Delete(args) => commands::delete(args, cwd).await,
        Command::Validate(args) => commands::validate(args, cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => {
            let config = Config::load(&cwd).unwrap_or_default();
            init_tracing(&config);
            run(cli.command, &cwd).await
        }
        Err(err) => Err(anyhow::anyhow!("Cannot get current directory: {}", err)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
