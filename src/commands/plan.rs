//! Dry run: list what a migration would write

use anyhow::Result;

use super::migrate::target_paths;
use crate::content::loader::ContentLoader;
use crate::Migration;

/// Print every content file and its target
pub fn run(migration: &Migration) -> Result<()> {
    let contents = ContentLoader::new(migration).load_all()?;
    let targets = target_paths(&migration.target_dir, &contents)?;

    println!("Files ({}):", contents.len());
    for (i, (file, target)) in contents.iter().zip(&targets).enumerate() {
        println!(
            "  {:03}: {:>10}, {}, {} -> {}",
            i,
            file.date_prefix,
            file.title,
            file.extension,
            target.display()
        );
    }

    Ok(())
}
