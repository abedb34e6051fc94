//! Configuration and defaults for snobed.
//!
//! This module contains the configuration structure that drives the
//! load-filter-annotate-export pipeline.

use std::path::PathBuf;

/// Name given to the table built from the input file.
pub const DEFAULT_NAME: &str = "humanGenome";

/// Annotation sources kept at load time.
pub const DEFAULT_SOURCES: [&str; 3] = ["ensembl", "havana", "ensembl_havana"];

/// Feature type exported by default.
pub const DEFAULT_FEATURE_TYPE: &str = "snoRNA";

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base name of the loaded table; lineage suffixes are appended to it.
    pub name: String,
    /// Sources to keep while loading. Empty keeps every source.
    pub sources: Vec<String>,
    /// Value of the `type` column to export.
    pub feature_type: String,
    /// Directory the BED file is written into.
    pub output_dir: PathBuf,
    /// Drop features outside assembled chromosomes.
    pub assembled_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: DEFAULT_NAME.to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            feature_type: DEFAULT_FEATURE_TYPE.to_string(),
            output_dir: PathBuf::from("."),
            assembled_only: true,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source allowlist from a comma-separated string.
    ///
    /// Blank entries are ignored, so an empty string keeps every source.
    pub fn parse_sources(&mut self, sources_str: &str) {
        self.sources = sources_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
}
