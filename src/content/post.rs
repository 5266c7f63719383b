//! Content file and post models

use std::path::PathBuf;

use super::filename::ParsedName;

/// A file found in the old tree, to be moved and possibly rewritten
#[derive(Debug, Clone)]
pub struct ContentFile {
    /// Slug taken from the filename
    pub title: String,

    /// `YYYY-MM` or `YYYY-MM-DD`
    pub date_prefix: String,

    /// Extension without the dot
    pub extension: String,

    /// Bytes as read from disk
    pub raw_content: Vec<u8>,

    /// Path the file was read from
    pub source: PathBuf,

    /// Rewritten document, only for markdown files
    pub post: Option<Post>,
}

impl ContentFile {
    /// Create a content file from its parsed name and bytes
    pub fn new(name: ParsedName, raw_content: Vec<u8>, source: PathBuf) -> Self {
        Self {
            title: name.slug,
            date_prefix: name.date_prefix,
            extension: name.extension,
            raw_content,
            source,
            post: None,
        }
    }

    /// Year the file is grouped under
    pub fn year(&self) -> &str {
        &self.date_prefix[..4]
    }

    /// Filename in the new layout
    pub fn target_name(&self) -> String {
        format!("{}.{}", self.title, self.extension)
    }

    /// Bytes to write: the rewritten post if there is one, the raw file otherwise
    pub fn output(&self) -> &[u8] {
        match &self.post {
            Some(post) => &post.content,
            None => &self.raw_content,
        }
    }
}

/// A fully rewritten markdown post (front-matter and body)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub content: Vec<u8>,
}
