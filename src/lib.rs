//! snobed - GFF3 feature filtering and BED export.
//!
//! This library loads GFF3 genome annotations into immutable feature tables,
//! narrows them with composable filters, extracts gene names from the
//! attributes column and writes the result as a BED file.
//!
//! # Features
//!
//! - Parse GFF3 files (with gzip support), optionally restricted to a set of sources
//! - Keep only features on assembled chromosomes (1-22, X, Y, MT)
//! - Filter on any column with equality or relational comparators
//! - Annotate features with the `Name=` attribute as gene name
//! - Export `chrom  chromStart  chromEnd  name` BED files
//!
//! Every transform returns a new table whose name records the operations
//! applied, e.g. `humanGenome--a--names--type-snoRNA`.
//!
//! # Example
//!
//! ```ignore
//! use snobed::parser::parse_gff3;
//! use snobed::output::export_bed;
//! use snobed::types::Column;
//! use std::path::Path;
//!
//! let hg = parse_gff3(Path::new("Homo_sapiens.GRCh38.85.gff3.gz"), "humanGenome", &[])?;
//! let snos = hg
//!     .assembled()
//!     .with_gene_annotation()
//!     .filtered_eq(Column::Type, "snoRNA")?;
//! export_bed(&snos, Path::new("."))?;
//! ```

pub mod attributes;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod table;
pub mod types;

pub use config::Config;
pub use error::{FeatureError, Result};
pub use output::BedRecord;
pub use table::{Comparator, FeatureTable, Operation};
pub use types::{Column, FeatureRecord, Strand};
