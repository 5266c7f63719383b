//! Write the migrated tree

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::loader::ContentLoader;
use crate::content::ContentFile;
use crate::error::MigrateError;
use crate::Migration;

/// What a run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub posts: usize,
    pub assets: usize,
}

/// Run the migration
pub fn run(migration: &Migration) -> Result<Summary> {
    let start = std::time::Instant::now();

    let contents = ContentLoader::new(migration).load_all()?;
    let targets = target_paths(&migration.target_dir, &contents)?;

    if migration.target_dir.exists() {
        tracing::warn!(
            "Target {:?} already exists, existing files may be overwritten",
            migration.target_dir
        );
    }

    let mut summary = Summary::default();
    for (file, target) in contents.iter().zip(&targets) {
        if let Some(dir) = target.parent() {
            ensure_dir(dir)?;
        }
        fs::write(target, file.output())
            .with_context(|| format!("Failed to write {:?}", target))?;
        tracing::debug!("{:?} -> {:?}", file.source, target);

        if file.post.is_some() {
            summary.posts += 1;
        } else {
            summary.assets += 1;
        }
    }

    tracing::info!(
        "Migrated {} posts and {} assets in {:?}",
        summary.posts,
        summary.assets,
        start.elapsed()
    );

    Ok(summary)
}

/// `<root>/<year>/<slug>.<ext>`
pub fn target_path(root: &Path, file: &ContentFile) -> PathBuf {
    root.join(file.year()).join(file.target_name())
}

/// Target of every file, in order. Fails if two files collide.
pub fn target_paths(root: &Path, contents: &[ContentFile]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(contents.len());

    for file in contents {
        let path = target_path(root, file);
        if !seen.insert(path.clone()) {
            return Err(MigrateError::DuplicateTarget { path }.into());
        }
        targets.push(path);
    }

    Ok(targets)
}

/// Create a directory, doing nothing if it already exists
fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigrateConfig;

    const PNG: [u8; 6] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a];

    fn source_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("_posts");
        let images = dir.path().join("static/img/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::create_dir_all(&images).unwrap();

        fs::write(
            posts.join("2022-01-30-private-link.md"),
            "---\nlayout: post\ntitle: Private Link\ntags: [privatelink, network]\n---\n\n![b](/static/img/posts/2022-01-private-link-basic.png)\n",
        )
        .unwrap();
        fs::write(
            posts.join("2013-03-22-meta-blogging.md"),
            "---\ntitle: Meta\n---\ntext\n",
        )
        .unwrap();
        fs::write(images.join("2022-01-private-link-basic.png"), PNG).unwrap();
        fs::write(images.join("2020-11-0-instances-runnning.png"), PNG).unwrap();
        dir
    }

    #[test]
    fn test_migrate_tree() {
        let src = source_tree();
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("content");
        let migration = Migration::with_config(src.path(), &target, MigrateConfig::default());

        let summary = run(&migration).unwrap();
        assert_eq!(summary, Summary { posts: 2, assets: 2 });

        let post = fs::read_to_string(target.join("2022/private-link.md")).unwrap();
        assert_eq!(
            post,
            "---\nlayout: post\ntags:\n- privatelink\n- network\ndate: \"2022-01-30\"\nredirect_from:\n- 2022/01/30/private-link.html\n---\n# Private Link\n\n![b](private-link-basic.png)\n"
        );
        assert!(target.join("2013/meta-blogging.md").is_file());
        assert_eq!(fs::read(target.join("2022/private-link-basic.png")).unwrap(), PNG);
        assert_eq!(fs::read(target.join("2020/0-instances-runnning.png")).unwrap(), PNG);
    }

    #[test]
    fn test_image_in_sub_directory() {
        let src = source_tree();
        let nested = src.path().join("static/img/posts/2019");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("2019-01-x.png"), PNG).unwrap();
        fs::write(
            src.path().join("_posts/2019-01-05-nested.md"),
            "---\ntitle: Nested\n---\n![x](/static/img/posts/2019/2019-01-x.png)\n",
        )
        .unwrap();
        let out = tempfile::tempdir().unwrap();
        let migration = Migration::with_config(src.path(), out.path(), MigrateConfig::default());

        run(&migration).unwrap();
        assert_eq!(fs::read(out.path().join("2019/x.png")).unwrap(), PNG);
        let post = fs::read_to_string(out.path().join("2019/nested.md")).unwrap();
        assert!(post.ends_with("# Nested\n\n![x](x.png)\n"));
    }

    #[test]
    fn test_existing_target_is_reused() {
        let src = source_tree();
        let out = tempfile::tempdir().unwrap();
        fs::create_dir_all(out.path().join("2022")).unwrap();
        let migration = Migration::with_config(src.path(), out.path(), MigrateConfig::default());

        run(&migration).unwrap();
        let summary = run(&migration).unwrap();
        assert_eq!(summary.posts, 2);
        assert!(out.path().join("2022/private-link.md").is_file());
    }

    #[test]
    fn test_nothing_written_on_bad_filename() {
        let src = source_tree();
        fs::write(src.path().join("_posts/draft.md"), "---\ntitle: D\n---\n").unwrap();
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("content");
        let migration = Migration::with_config(src.path(), &target, MigrateConfig::default());

        assert!(run(&migration).is_err());
        assert!(!target.exists());
    }

    #[test]
    fn test_duplicate_targets() {
        let src = source_tree();
        fs::write(
            src.path().join("_posts/2022-02-01-private-link.md"),
            "---\ntitle: Again\n---\n",
        )
        .unwrap();
        let out = tempfile::tempdir().unwrap();
        let migration = Migration::with_config(src.path(), out.path(), MigrateConfig::default());

        let err = run(&migration).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MigrateError>(),
            Some(MigrateError::DuplicateTarget { .. })
        ));
        assert!(!out.path().join("2022").exists());
    }
}
