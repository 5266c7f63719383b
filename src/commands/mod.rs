//! Commands run from the CLI

pub mod migrate;
pub mod plan;
