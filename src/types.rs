//! Core data structures for snobed.
//!
//! This module contains the row type of a feature table and the small
//! enumerations used to address and interpret its fields.

use std::fmt;
use std::str::FromStr;

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
    /// `.` - the feature is not stranded.
    Unstranded,
    /// `?` - stranded, but the strand is not known.
    Unknown,
}

/// Error type for parsing strand from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrandError;

impl fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strand: expected '+', '-', '.' or '?'")
    }
}

impl std::error::Error for ParseStrandError {}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            "." => Ok(Strand::Unstranded),
            "?" => Ok(Strand::Unknown),
            _ => Err(ParseStrandError),
        }
    }
}

impl Strand {
    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
            Strand::Unstranded => ".",
            Strand::Unknown => "?",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Addressable columns of a feature table.
///
/// The first nine are the fixed GFF3 columns; `Gene` only exists after
/// annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Seqid,
    Source,
    Type,
    Start,
    End,
    Score,
    Strand,
    Phase,
    Attributes,
    Gene,
}

/// The fixed GFF3 column layout, in file order.
pub const GFF3_COLUMNS: [Column; 9] = [
    Column::Seqid,
    Column::Source,
    Column::Type,
    Column::Start,
    Column::End,
    Column::Score,
    Column::Strand,
    Column::Phase,
    Column::Attributes,
];

/// Error type for parsing a column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColumnError(pub String);

impl fmt::Display for ParseColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column: {}", self.0)
    }
}

impl std::error::Error for ParseColumnError {}

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seqid" => Ok(Column::Seqid),
            "source" => Ok(Column::Source),
            "type" => Ok(Column::Type),
            "start" => Ok(Column::Start),
            "end" => Ok(Column::End),
            "score" => Ok(Column::Score),
            "strand" => Ok(Column::Strand),
            "phase" => Ok(Column::Phase),
            "attributes" => Ok(Column::Attributes),
            "gene" => Ok(Column::Gene),
            _ => Err(ParseColumnError(s.to_string())),
        }
    }
}

impl Column {
    /// Column name as it appears in lineage names and headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Seqid => "seqid",
            Column::Source => "source",
            Column::Type => "type",
            Column::Start => "start",
            Column::End => "end",
            Column::Score => "score",
            Column::Strand => "strand",
            Column::Phase => "phase",
            Column::Attributes => "attributes",
            Column::Gene => "gene",
        }
    }

    /// Whether values in this column compare as integers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Start | Column::End)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A borrowed view of a single field, typed for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One feature row of a GFF3 table.
///
/// `score` and `phase` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub seqid: String,
    pub source: String,
    pub feature_type: String,
    /// 1-based, inclusive.
    pub start: i64,
    /// Inclusive, never below `start`.
    pub end: i64,
    pub score: String,
    pub strand: Strand,
    pub phase: String,
    pub attributes: String,
    /// Gene name, set by annotation (possibly empty).
    pub gene: Option<String>,
}

impl FeatureRecord {
    /// Build a record from its nine raw GFF3 fields.
    ///
    /// `line` is only used for error reporting.
    pub fn from_fields(fields: &[&str], line: usize) -> crate::error::Result<Self> {
        use crate::error::FeatureError;

        if fields.len() != GFF3_COLUMNS.len() {
            return Err(FeatureError::Schema(format!(
                "line {} has {} columns, expected {}",
                line,
                fields.len(),
                GFF3_COLUMNS.len()
            )));
        }

        let parse_coord = |s: &str, what: &str| -> crate::error::Result<i64> {
            s.parse().map_err(|_| FeatureError::InvalidRecord {
                line,
                msg: format!("{} coordinate '{}' is not an integer", what, s),
            })
        };
        let start = parse_coord(fields[3], "start")?;
        let end = parse_coord(fields[4], "end")?;
        if end < start {
            return Err(FeatureError::InvalidRecord {
                line,
                msg: format!("end {} is before start {}", end, start),
            });
        }

        let strand = fields[6]
            .parse::<Strand>()
            .map_err(|e| FeatureError::InvalidRecord {
                line,
                msg: e.to_string(),
            })?;

        Ok(FeatureRecord {
            seqid: fields[0].to_string(),
            source: fields[1].to_string(),
            feature_type: fields[2].to_string(),
            start,
            end,
            score: fields[5].to_string(),
            strand,
            phase: fields[7].to_string(),
            attributes: fields[8].to_string(),
            gene: None,
        })
    }

    /// Typed view of one field. `None` for `gene` before annotation.
    pub fn field(&self, column: Column) -> Option<FieldValue<'_>> {
        let value = match column {
            Column::Seqid => FieldValue::Text(&self.seqid),
            Column::Source => FieldValue::Text(&self.source),
            Column::Type => FieldValue::Text(&self.feature_type),
            Column::Start => FieldValue::Int(self.start),
            Column::End => FieldValue::Int(self.end),
            Column::Score => FieldValue::Text(&self.score),
            Column::Strand => FieldValue::Text(self.strand.as_str()),
            Column::Phase => FieldValue::Text(&self.phase),
            Column::Attributes => FieldValue::Text(&self.attributes),
            Column::Gene => FieldValue::Text(self.gene.as_deref()?),
        };
        Some(value)
    }
}
