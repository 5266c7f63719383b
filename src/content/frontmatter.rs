//! Front-matter parsing

use serde::{Deserialize, Deserializer};
use serde_yaml::Mapping;

use crate::error::{MigrateError, Result};

/// Tags may be written as one string, a list, or left empty
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of an old-style post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub tagline: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,

    /// Every other field, in document order
    #[serde(flatten)]
    pub extra: Mapping,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let (yaml, body) = split(content)?;

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
        Ok((fm, body))
    }
}

/// Split a document into its YAML block and the text after the closing `---`
fn split(content: &str) -> Result<(&str, &str)> {
    let rest = content
        .strip_prefix("---")
        .ok_or(MigrateError::MissingFrontMatter)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .ok_or(MigrateError::MissingFrontMatter)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(MigrateError::MissingFrontMatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
layout: post
title: "Private Link is the IP filtering of the cloud"
tags: [privatelink, network]
tagline: Use cases for Private Link.
---

foo
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.title.as_deref(),
            Some("Private Link is the IP filtering of the cloud")
        );
        assert_eq!(fm.tagline.as_deref(), Some("Use cases for Private Link."));
        assert_eq!(fm.tags, vec!["privatelink", "network"]);
        assert_eq!(fm.extra.len(), 1);
        assert_eq!(fm.extra.get("layout"), Some(&Value::from("post")));
        assert_eq!(body, "\nfoo\n");
    }

    #[test]
    fn test_missing_tags_is_empty() {
        let (fm, _) = FrontMatter::parse("---\ntitle: T\n---\nbody\n").unwrap();
        assert!(fm.tags.is_empty());

        let (fm, _) = FrontMatter::parse("---\ntitle: T\ntags:\n---\nbody\n").unwrap();
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_single_string_tag() {
        let (fm, _) = FrontMatter::parse("---\ntitle: T\ntags: notes\n---\n").unwrap();
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_extra_fields_keep_order() {
        let content = "---\nlayout: post\ntitle: T\ncomments: true\npermalink: /x/\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.extra.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["layout", "comments", "permalink"]);
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody\n").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_crlf_delimiters() {
        let (fm, body) = FrontMatter::parse("---\r\ntitle: T\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_missing_block() {
        assert!(matches!(
            FrontMatter::parse("# Just markdown\n"),
            Err(MigrateError::MissingFrontMatter)
        ));
        assert!(matches!(
            FrontMatter::parse("---\ntitle: never closed\n"),
            Err(MigrateError::MissingFrontMatter)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            FrontMatter::parse("---\ntitle: [unclosed\n---\n"),
            Err(MigrateError::InvalidFrontMatter(_))
        ));
        assert!(matches!(
            FrontMatter::parse("---\n- just\n- a list\n---\n"),
            Err(MigrateError::InvalidFrontMatter(_))
        ));
    }
}
