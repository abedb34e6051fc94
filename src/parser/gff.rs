//! GFF3 file parser with gzip support.
//!
//! Reads the nine tab-separated GFF3 columns into a [`FeatureTable`].
//! Comment and directive lines (`#...`) and blank lines are skipped.

use ahash::AHashSet;
use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::create_buffered_reader;
use crate::table::FeatureTable;
use crate::types::FeatureRecord;

/// Parse a GFF3 file into a table called `name`.
///
/// When `sources` is non-empty only rows from those sources are kept. This
/// happens before the table exists, so it is not part of the table's name.
/// Supports both plain text and gzip-compressed files.
pub fn parse_gff3(path: &Path, name: &str, sources: &[String]) -> Result<FeatureTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open GFF3 file: {}", path.display()))?;
    let reader = create_buffered_reader(file, path);

    parse_gff3_reader(reader, name, sources)
        .with_context(|| format!("Failed to parse GFF3 file: {}", path.display()))
}

/// Parse GFF3 data from a reader.
pub fn parse_gff3_reader<R: BufRead>(
    reader: R,
    name: &str,
    sources: &[String],
) -> Result<FeatureTable> {
    let allowed: AHashSet<&str> = sources.iter().map(String::as_str).collect();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read GFF3 line")?;
        let line_no = idx + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let record = FeatureRecord::from_fields(&fields, line_no)?;

        if !allowed.is_empty() && !allowed.contains(record.source.as_str()) {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    debug!(
        "Loaded {} features ({} dropped by source)",
        records.len(),
        skipped
    );
    Ok(FeatureTable::new(name, records))
}
