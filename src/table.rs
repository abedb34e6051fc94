//! In-memory feature tables and the transforms defined over them.
//!
//! A [`FeatureTable`] is never modified once built. Every transform returns
//! a fresh table whose name is the parent's name plus a fixed suffix, so the
//! name doubles as a log of the operations applied since load.

use ahash::AHashSet;
use indexmap::IndexSet;
use log::{debug, info};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::attributes::gene_name;
use crate::error::{FeatureError, Result};
use crate::types::{Column, FeatureRecord, FieldValue, GFF3_COLUMNS};

/// Sequence IDs of finished chromosomes: autosomes, sex chromosomes and
/// the mitochondrial genome.
pub const ASSEMBLED_SEQIDS: [&str; 25] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "MT",
];

/// Binary relation used by [`FeatureTable::filtered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
    #[default]
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Error type for parsing a comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseComparatorError;

impl fmt::Display for ParseComparatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid comparator: expected one of eq, ne, lt, le, gt, ge")
    }
}

impl std::error::Error for ParseComparatorError {}

impl FromStr for Comparator {
    type Err = ParseComparatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "eq" | "==" => Ok(Comparator::Eq),
            "ne" | "!=" => Ok(Comparator::Ne),
            "lt" | "<" => Ok(Comparator::Lt),
            "le" | "<=" => Ok(Comparator::Le),
            "gt" | ">" => Ok(Comparator::Gt),
            "ge" | ">=" => Ok(Comparator::Ge),
            _ => Err(ParseComparatorError),
        }
    }
}

impl Comparator {
    /// Whether `lhs <op> rhs` holds given `lhs.cmp(rhs)`.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Ne => ordering != Ordering::Equal,
            Comparator::Lt => ordering == Ordering::Less,
            Comparator::Le => ordering != Ordering::Greater,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Ge => ordering != Ordering::Less,
        }
    }

    /// Short tag used in lineage names.
    pub fn tag(&self) -> &'static str {
        match self {
            Comparator::Eq => "eq",
            Comparator::Ne => "ne",
            Comparator::Lt => "lt",
            Comparator::Le => "le",
            Comparator::Gt => "gt",
            Comparator::Ge => "ge",
        }
    }

    /// Operator symbol used in log messages.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
        }
    }
}

/// One step in a table's lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Assembled,
    GeneNames,
    Filter {
        column: Column,
        comparator: Comparator,
        value: String,
    },
}

impl Operation {
    /// Suffix appended to the parent name.
    pub fn suffix(&self) -> String {
        match self {
            Operation::Assembled => "--a".to_string(),
            Operation::GeneNames => "--names".to_string(),
            Operation::Filter {
                column,
                comparator: Comparator::Eq,
                value,
            } => format!("--{}-{}", column, value),
            Operation::Filter {
                column,
                comparator,
                value,
            } => format!("--{}-{}-{}", column, comparator.tag(), value),
        }
    }
}

/// An immutable, named table of GFF3 features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable {
    name: String,
    lineage: Vec<Operation>,
    rows: Vec<FeatureRecord>,
    annotated: bool,
}

impl FeatureTable {
    /// Create a table from freshly loaded records.
    ///
    /// Any gene values on the records are discarded; only
    /// [`with_gene_annotation`](Self::with_gene_annotation) adds that column.
    pub fn new(name: impl Into<String>, rows: Vec<FeatureRecord>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.gene = None;
                r
            })
            .collect();
        FeatureTable {
            name: name.into(),
            lineage: Vec::new(),
            rows,
            annotated: false,
        }
    }

    /// Create a table from a header and raw string rows.
    ///
    /// The header must be exactly the nine GFF3 column names in order.
    pub fn from_columns<S: AsRef<str>>(
        name: impl Into<String>,
        header: &[S],
        rows: &[Vec<S>],
    ) -> Result<Self> {
        let matches = header.len() == GFF3_COLUMNS.len()
            && header
                .iter()
                .zip(GFF3_COLUMNS.iter())
                .all(|(h, c)| h.as_ref() == c.as_str());
        if !matches {
            let found: Vec<&str> = header.iter().map(|h| h.as_ref()).collect();
            return Err(FeatureError::Schema(format!(
                "expected columns [{}], found [{}]",
                GFF3_COLUMNS.map(|c| c.as_str()).join(", "),
                found.join(", ")
            )));
        }

        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let fields: Vec<&str> = row.iter().map(|f| f.as_ref()).collect();
                FeatureRecord::from_fields(&fields, i + 1)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FeatureTable::new(name, records))
    }

    /// Name of the table, including every lineage suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operations applied since load, oldest first.
    pub fn lineage(&self) -> &[Operation] {
        &self.lineage
    }

    pub fn rows(&self) -> &[FeatureRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the derived `gene` column is present.
    pub fn has_gene(&self) -> bool {
        self.annotated
    }

    /// Columns present in this table.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = GFF3_COLUMNS.to_vec();
        if self.annotated {
            columns.push(Column::Gene);
        }
        columns
    }

    /// Distinct values of a column, in order of first occurrence.
    pub fn unique_values(&self, column: Column) -> Result<IndexSet<String>> {
        self.require(column)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|r| r.field(column))
            .map(|v| v.to_string())
            .collect())
    }

    pub fn seq_ids(&self) -> IndexSet<String> {
        self.rows.iter().map(|r| r.seqid.clone()).collect()
    }

    pub fn types(&self) -> IndexSet<String> {
        self.rows.iter().map(|r| r.feature_type.clone()).collect()
    }

    pub fn sources(&self) -> IndexSet<String> {
        self.rows.iter().map(|r| r.source.clone()).collect()
    }

    /// Keep only features on assembled chromosomes (see [`ASSEMBLED_SEQIDS`]).
    pub fn assembled(&self) -> FeatureTable {
        info!("{}: filtering unassembled...", self.name);
        let keep: AHashSet<&str> = ASSEMBLED_SEQIDS.iter().copied().collect();
        let rows = self
            .rows
            .iter()
            .filter(|r| keep.contains(r.seqid.as_str()))
            .cloned()
            .collect();
        self.derive(Operation::Assembled, rows, self.annotated)
    }

    /// Keep rows where `row[column] <comparator> value` holds.
    ///
    /// `start` and `end` compare as integers, every other column as text.
    pub fn filtered(&self, column: Column, value: &str, comparator: Comparator) -> Result<FeatureTable> {
        self.require(column)?;
        info!(
            "{}: subsetting \"{} {} {}\"...",
            self.name,
            column,
            comparator.symbol(),
            value
        );

        let target = if column.is_numeric() {
            let parsed = value
                .parse::<i64>()
                .map_err(|_| FeatureError::InvalidFilterValue {
                    column: column.to_string(),
                    value: value.to_string(),
                })?;
            FieldValue::Int(parsed)
        } else {
            FieldValue::Text(value)
        };

        let rows: Vec<FeatureRecord> = self
            .rows
            .iter()
            .filter(|r| match (r.field(column), target) {
                (Some(FieldValue::Int(a)), FieldValue::Int(b)) => comparator.holds(a.cmp(&b)),
                (Some(FieldValue::Text(a)), FieldValue::Text(b)) => comparator.holds(a.cmp(b)),
                _ => false,
            })
            .cloned()
            .collect();
        debug!("{}: kept {} of {} rows", self.name, rows.len(), self.rows.len());

        let op = Operation::Filter {
            column,
            comparator,
            value: value.to_string(),
        };
        Ok(self.derive(op, rows, self.annotated))
    }

    /// Shorthand for an equality [`filtered`](Self::filtered).
    pub fn filtered_eq(&self, column: Column, value: &str) -> Result<FeatureTable> {
        self.filtered(column, value, Comparator::Eq)
    }

    /// Add the `gene` column, read from each row's `Name=` attribute.
    ///
    /// Rows without a name get an empty gene, so this never fails.
    pub fn with_gene_annotation(&self) -> FeatureTable {
        info!("{}: getting gene names...", self.name);
        let rows = self
            .rows
            .iter()
            .map(|r| FeatureRecord {
                gene: Some(gene_name(&r.attributes).to_string()),
                ..r.clone()
            })
            .collect();
        self.derive(Operation::GeneNames, rows, true)
    }

    fn require(&self, column: Column) -> Result<()> {
        if column == Column::Gene && !self.annotated {
            return Err(FeatureError::MissingColumn(column.to_string()));
        }
        Ok(())
    }

    fn derive(&self, op: Operation, rows: Vec<FeatureRecord>, annotated: bool) -> FeatureTable {
        let name = format!("{}{}", self.name, op.suffix());
        let mut lineage = self.lineage.clone();
        lineage.push(op);
        FeatureTable {
            name,
            lineage,
            rows,
            annotated,
        }
    }
}
