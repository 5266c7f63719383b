//! CLI entry point for jekyll-migrate

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jekyll-migrate")]
#[command(version)]
#[command(about = "Move a Jekyll blog's posts and images into a year-grouped content tree", long_about = None)]
struct Cli {
    /// Where to migrate the content from (contains _posts and static/img/posts)
    #[arg(short, long)]
    from: PathBuf,

    /// Where to write the new content tree (should not exist yet)
    #[arg(short, long)]
    to: PathBuf,

    /// YAML file overriding the default layout and field names
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only list what would be written
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "jekyll_migrate=debug,info"
    } else {
        "jekyll_migrate=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let migration = jekyll_migrate::Migration::new(&cli.from, &cli.to, cli.config.as_deref())?;

    if cli.dry_run {
        migration.plan()?;
        return Ok(());
    }

    tracing::info!("Migrating {:?} to {:?}", cli.from, cli.to);
    let summary = migration.run()?;
    println!(
        "Migrated {} posts and {} assets into {:?}",
        summary.posts, summary.assets, cli.to
    );

    Ok(())
}
