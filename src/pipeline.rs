//! The fixed feature-to-BED pipeline.
//!
//! load -> assembled -> gene names -> type filter -> BED export. Each stage
//! consumes the previous table and a failing stage stops the run.

use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::export_bed;
use crate::table::FeatureTable;
use crate::types::Column;

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Name of the exported table.
    pub name: String,
    /// Rows in the exported table, equal to the BED rows written.
    pub rows: usize,
    /// Written file, `None` if nothing was written.
    pub path: Option<PathBuf>,
}

/// Build the exported table from a loaded one without writing anything.
pub fn transform(config: &Config, loaded: &FeatureTable) -> Result<FeatureTable> {
    let located = if config.assembled_only {
        loaded.assembled()
    } else {
        loaded.clone()
    };
    let named = located.with_gene_annotation();
    named.filtered_eq(Column::Type, &config.feature_type)
}

/// Run the pipeline on a loaded table and write the BED file.
pub fn run(config: &Config, loaded: &FeatureTable) -> Result<PipelineReport> {
    let selected = transform(config, loaded)?;
    let path = export_bed(&selected, &config.output_dir)?;

    info!(
        "{}: {} of {} features exported",
        selected.name(),
        selected.len(),
        loaded.len()
    );

    Ok(PipelineReport {
        name: selected.name().to_string(),
        rows: selected.len(),
        path,
    })
}
