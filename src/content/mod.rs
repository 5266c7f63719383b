//! Content module - filename parsing, front-matter and post rewriting

pub mod filename;
mod frontmatter;
pub mod loader;
mod post;
pub mod transform;

pub use filename::ParsedName;
pub use frontmatter::FrontMatter;
pub use post::{ContentFile, Post};
pub use transform::Transformer;
