//! BED export of annotated feature tables.
//!
//! Each feature becomes one `chrom  chromStart  chromEnd  name` row, in
//! table order. Coordinates are copied from the GFF3 row unchanged.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{FeatureError, Result};
use crate::table::FeatureTable;
use crate::types::{Column, FeatureRecord};

/// Header line of every BED file written.
pub const BED_HEADER: &str = "chrom\tchromStart\tchromEnd\tname";

/// Rows formatted per write call.
pub const BATCH_SIZE: usize = 16;

/// One BED interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub chrom: String,
    pub chrom_start: i64,
    pub chrom_end: i64,
    pub name: String,
}

impl BedRecord {
    /// Project an annotated feature. `None` if the row has no gene column.
    pub fn from_feature(record: &FeatureRecord) -> Option<Self> {
        Some(BedRecord {
            chrom: format!("chr{}", record.seqid),
            chrom_start: record.start,
            chrom_end: record.end,
            name: record.gene.clone()?,
        })
    }
}

/// Map every row of an annotated table to a BED record.
pub fn project(table: &FeatureTable) -> Result<Vec<BedRecord>> {
    if !table.has_gene() {
        return Err(FeatureError::MissingColumn(Column::Gene.to_string()));
    }
    table
        .rows()
        .iter()
        .map(|r| {
            BedRecord::from_feature(r)
                .ok_or_else(|| FeatureError::MissingColumn(Column::Gene.to_string()))
        })
        .collect()
}

/// Write the BED header.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", BED_HEADER)?;
    Ok(())
}

/// Format a single BED line (without newline).
pub fn format_bed_line(record: &BedRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        record.chrom, record.chrom_start, record.chrom_end, record.name
    )
}

/// Write a header and all records, returning the number of data rows.
pub fn write_bed<W: Write>(writer: &mut W, records: &[BedRecord]) -> Result<usize> {
    write_header(writer)?;

    let mut buf = String::new();
    for batch in records.chunks(BATCH_SIZE) {
        buf.clear();
        for record in batch {
            buf.push_str(&format_bed_line(record));
            buf.push('\n');
        }
        writer.write_all(buf.as_bytes())?;
    }

    Ok(records.len())
}

/// Export a table to `<dir>/<table name>.bed`.
///
/// Returns the written path, or `None` when nothing was written.
pub fn export_bed(table: &FeatureTable, dir: &Path) -> Result<Option<PathBuf>> {
    export_bed_as(table, dir, table.name())
}

/// Export a table to `<dir>/<stem>.bed`.
///
/// An empty `stem` writes nothing and returns `Ok(None)`.
pub fn export_bed_as(table: &FeatureTable, dir: &Path, stem: &str) -> Result<Option<PathBuf>> {
    let records = project(table)?;

    if stem.is_empty() {
        warn!("{}: empty output name, skipping BED export", table.name());
        return Ok(None);
    }

    info!("{}: writing BED file...", table.name());
    let path = dir.join(format!("{}.bed", stem));
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    let written = write_bed(&mut writer, &records)?;
    writer.flush()?;
    debug!("Wrote {} BED rows to {}", written, path.display());

    Ok(Some(path))
}
