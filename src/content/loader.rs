//! Content loader - reads posts and images from the old tree

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::filename::ParsedName;
use super::transform::Transformer;
use super::ContentFile;
use crate::error::MigrateError;
use crate::Migration;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    migration: &'a Migration,
    transformer: Transformer<'a>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(migration: &'a Migration) -> Self {
        let transformer = Transformer::new(&migration.config);
        Self {
            migration,
            transformer,
        }
    }

    /// Load posts and images. Every unparseable filename is reported
    /// before failing.
    pub fn load_all(&self) -> Result<Vec<ContentFile>> {
        let mut bad_names = Vec::new();

        let posts_dir = self.migration.source_dir.join(&self.migration.config.posts_dir);
        let images_dir = self.migration.source_dir.join(&self.migration.config.images_dir);

        let mut contents = self.load_dir(&posts_dir, &mut bad_names)?;
        contents.extend(self.load_dir(&images_dir, &mut bad_names)?);

        if !bad_names.is_empty() {
            return Err(MigrateError::InvalidFilenames { names: bad_names }.into());
        }

        let posts = contents.iter().filter(|c| c.post.is_some()).count();
        tracing::info!(
            "Loaded {} posts and {} other files",
            posts,
            contents.len() - posts
        );

        Ok(contents)
    }

    /// Load every file below `dir`, sorted by name
    fn load_dir(&self, dir: &Path, bad_names: &mut Vec<String>) -> Result<Vec<ContentFile>> {
        if !dir.is_dir() {
            anyhow::bail!("Source directory not found: {:?}", dir);
        }

        let mut contents = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", dir))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if file_name.starts_with('.') {
                tracing::debug!("Skipping hidden file {:?}", entry.path());
                continue;
            }

            let name = match ParsedName::parse(&file_name) {
                Ok(name) => name,
                Err(e) => {
                    tracing::error!("{} ({:?})", e, entry.path());
                    bad_names.push(file_name.into_owned());
                    continue;
                }
            };

            contents.push(self.load_file(entry.path(), name)?);
        }

        Ok(contents)
    }

    /// Read one file, deriving its post when it is markdown
    fn load_file(&self, path: &Path, name: ParsedName) -> Result<ContentFile> {
        let raw = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        let mut file = ContentFile::new(name, raw, path.to_path_buf());

        if self.migration.config.is_markdown(&file.extension) {
            let post = self
                .transformer
                .transform(&file.title, &file.date_prefix, &file.raw_content)
                .with_context(|| format!("Failed to process post {:?}", path))?;
            file.post = Some(post);
        }

        tracing::debug!(
            "{:>10}, {}, {}",
            file.date_prefix,
            file.title,
            file.extension
        );

        Ok(file)
    }
}
