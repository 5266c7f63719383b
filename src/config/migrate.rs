//! Migration configuration (optional YAML file)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main migration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    // Source layout
    pub posts_dir: String,
    pub images_dir: String,
    /// URL prefix under which posts reference their images
    pub image_prefix: String,

    // Front-matter
    /// Name of the field holding the filename date (`date` or `created`)
    pub date_field: String,
    /// Fields removed from the carried front-matter, besides title and tagline
    pub drop_fields: Vec<String>,

    /// Extensions that are treated as posts and rewritten
    pub markdown_extensions: Vec<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            posts_dir: "_posts".to_string(),
            images_dir: "static/img/posts".to_string(),
            image_prefix: "/static/img/posts/".to_string(),

            date_field: "date".to_string(),
            drop_fields: Vec::new(),

            markdown_extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

impl MigrateConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: MigrateConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Whether files with this extension are posts
    pub fn is_markdown(&self, extension: &str) -> bool {
        self.markdown_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}
