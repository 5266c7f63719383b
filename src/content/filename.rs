//! Old-style filename parsing (`YYYY-MM[-DD]-slug.ext`)

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{MigrateError, Result};

lazy_static! {
    /// Date prefix, slug and extension of a Jekyll content filename.
    /// A day is only taken when two digits follow the month, so a slug
    /// like `0-instances-running` stays intact.
    static ref FILENAME_RE: Regex =
        Regex::new(r"^([0-9]{4}-[0-9]{2}(?:-[0-9]{2})?)-([0-9A-Za-z-]+)\.([0-9A-Za-z]+)$")
            .expect("filename pattern is valid");
}

/// The pieces of a parsed content filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// `YYYY-MM` or `YYYY-MM-DD`
    pub date_prefix: String,
    pub slug: String,
    pub extension: String,
}

impl ParsedName {
    /// Split a base filename (no directory) into date prefix, slug and extension
    pub fn parse(name: &str) -> Result<Self> {
        let unparseable = || MigrateError::UnparseableFilename {
            name: name.to_string(),
        };

        let caps = FILENAME_RE.captures(name).ok_or_else(unparseable)?;
        let date_prefix = &caps[1];

        if !is_calendar_date(date_prefix) {
            return Err(unparseable());
        }

        Ok(Self {
            date_prefix: date_prefix.to_string(),
            slug: caps[2].to_string(),
            extension: caps[3].to_string(),
        })
    }

    /// Filename in the new layout: `<slug>.<ext>`
    pub fn target_name(&self) -> String {
        format!("{}.{}", self.slug, self.extension)
    }
}

/// Check that a `YYYY-MM[-DD]` prefix names a real month (and day)
fn is_calendar_date(prefix: &str) -> bool {
    let full = if prefix.len() == 7 {
        format!("{}-01", prefix)
    } else {
        prefix.to_string()
    };
    NaiveDate::parse_from_str(&full, "%Y-%m-%d").is_ok()
}
