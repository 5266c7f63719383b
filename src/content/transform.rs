//! Rewrites an old-style post into the new front-matter and body layout

use regex::{Captures, Regex};
use serde_yaml::{Mapping, Value};

use super::filename::ParsedName;
use super::{FrontMatter, Post};
use crate::config::MigrateConfig;
use crate::error::{MigrateError, Result};

const TAGS: &str = "tags";
const REDIRECT_FROM: &str = "redirect_from";

/// Turns the raw bytes of a Jekyll post into a [`Post`]
pub struct Transformer<'a> {
    config: &'a MigrateConfig,
    image_re: Regex,
}

impl<'a> Transformer<'a> {
    pub fn new(config: &'a MigrateConfig) -> Self {
        // A reference starts after a delimiter, may carry the old site's
        // scheme and host, and may point into a sub-directory. Only the last
        // path segment survives.
        let pattern = format!(
            r#"(?m)(^|[\s(<'"=])(?:https?://[^/\s'"()<>]+)?{}(?:[0-9A-Za-z_.-]+/)*([0-9A-Za-z_-]+\.[0-9A-Za-z]+)"#,
            regex::escape(&config.image_prefix)
        );
        let image_re = Regex::new(&pattern).expect("escaped image prefix is a valid pattern");
        Self { config, image_re }
    }

    /// Rewrite a post whose filename gave `date_prefix` and `slug`
    pub fn transform(&self, slug: &str, date_prefix: &str, raw: &[u8]) -> Result<Post> {
        let content = std::str::from_utf8(raw)?;
        let (fm, body) = FrontMatter::parse(content)?;

        let title = fm
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(MigrateError::MissingTitle)?
            .to_string();
        let tagline = fm.tagline.as_deref().map(str::trim).unwrap_or_default();

        let mut out = String::with_capacity(content.len() + 64);
        out.push_str("---\n");
        out.push_str(&self.render_front_matter(&fm, slug, date_prefix)?);
        out.push_str("---\n");

        out.push_str("# ");
        out.push_str(&title);
        out.push_str("\n\n");
        if !tagline.is_empty() {
            out.push_str(tagline);
            out.push_str("\n\n");
        }

        let body = body.trim_start_matches(['\n', '\r']);
        out.push_str(&self.rewrite_images(body));

        Ok(Post {
            content: out.into_bytes(),
        })
    }

    /// Carried fields, then tags, the date field and redirect_from
    fn render_front_matter(
        &self,
        fm: &FrontMatter,
        slug: &str,
        date_prefix: &str,
    ) -> Result<String> {
        let date_field = self.config.date_field.as_str();
        let mut redirects = Vec::new();

        let mut carried = Mapping::new();
        for (key, value) in &fm.extra {
            match key.as_str() {
                Some(REDIRECT_FROM) => redirects.extend(string_list(value)),
                Some(TAGS) => {}
                Some(k) if k == date_field => {}
                Some(k) if self.config.drop_fields.iter().any(|d| d == k) => {}
                _ => {
                    carried.insert(key.clone(), value.clone());
                }
            }
        }

        let tags = fm.tags.iter().cloned().map(Value::String).collect();
        carried.insert(Value::from(TAGS), Value::Sequence(tags));

        let redirect = redirect_path(slug, date_prefix);
        if !redirects.contains(&redirect) {
            redirects.push(redirect);
        }
        let mut trailer = Mapping::new();
        trailer.insert(
            Value::from(REDIRECT_FROM),
            Value::Sequence(redirects.into_iter().map(Value::String).collect()),
        );

        // The date is written by hand so it always stays a quoted string.
        let mut yaml = serde_yaml::to_string(&carried)?;
        yaml.push_str(&format!("{}: \"{}\"\n", date_field, date_prefix));
        yaml.push_str(&serde_yaml::to_string(&trailer)?);
        Ok(yaml)
    }

    /// Replace legacy image urls with the bare, undated filename
    pub fn rewrite_images(&self, body: &str) -> String {
        self.image_re
            .replace_all(body, |caps: &Captures| {
                let name = match ParsedName::parse(&caps[2]) {
                    Ok(name) => name.target_name(),
                    Err(e) => {
                        tracing::warn!("Keeping image name as is: {}", e);
                        caps[2].to_string()
                    }
                };
                format!("{}{}", &caps[1], name)
            })
            .into_owned()
    }
}

/// Legacy url of a post: `2022/01/30/private-link.html`
pub fn redirect_path(slug: &str, date_prefix: &str) -> String {
    format!("{}/{}.html", date_prefix.replace('-', "/"), slug)
}

/// A string or a list of strings from a YAML value; anything else is ignored
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Sequence(seq) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
