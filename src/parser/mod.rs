//! Parsers for genomic file formats.

pub mod gff;
pub mod util;

pub use gff::{parse_gff3, parse_gff3_reader};
