//! jekyll-migrate: moves a Jekyll blog's posts and images into a
//! year-grouped content tree
//!
//! Posts get new front-matter (tags, date, redirect_from), their title and
//! tagline moved into the body and their image links rewritten to bare
//! filenames. Images are copied unchanged next to the posts of their year.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A single migration run
#[derive(Clone)]
pub struct Migration {
    /// Migration configuration
    pub config: config::MigrateConfig,
    /// Root of the old blog (contains `_posts` and `static/img/posts`)
    pub source_dir: PathBuf,
    /// Root of the new content tree
    pub target_dir: PathBuf,
}

impl Migration {
    /// Create a migration, loading the config file when one is given
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        source_dir: P,
        target_dir: Q,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::MigrateConfig::load(path)?,
            None => config::MigrateConfig::default(),
        };
        Ok(Self::with_config(source_dir, target_dir, config))
    }

    /// Create a migration with an explicit configuration
    pub fn with_config<P: AsRef<Path>, Q: AsRef<Path>>(
        source_dir: P,
        target_dir: Q,
        config: config::MigrateConfig,
    ) -> Self {
        Self {
            config,
            source_dir: source_dir.as_ref().to_path_buf(),
            target_dir: target_dir.as_ref().to_path_buf(),
        }
    }

    /// Read, transform and write the whole tree
    pub fn run(&self) -> Result<commands::migrate::Summary> {
        commands::migrate::run(self)
    }

    /// List what would be written, without touching the target
    pub fn plan(&self) -> Result<()> {
        commands::plan::run(self)
    }
}
