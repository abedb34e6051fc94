//! Library-level tests for feature tables, attribute parsing and BED export.
//!
//! These check the properties every transform must keep: filters only
//! shrink, annotation never drops rows, and names record the lineage.

use snobed::attributes::gene_name;
use snobed::output::{format_bed_line, project, write_bed, BED_HEADER};
use snobed::parser::parse_gff3;
use snobed::table::{Comparator, FeatureTable, Operation, ASSEMBLED_SEQIDS};
use snobed::types::{Column, GFF3_COLUMNS};
use snobed::FeatureError;
use std::path::Path;

// -------------------------------------------------------------------------
// Helper functions
// -------------------------------------------------------------------------

fn header() -> Vec<&'static str> {
    GFF3_COLUMNS.iter().map(|c| c.as_str()).collect()
}

fn row<'a>(seqid: &'a str, feature_type: &'a str, start: &'a str, attrs: &'a str) -> Vec<&'a str> {
    vec![seqid, "ensembl", feature_type, start, "5000", ".", "+", ".", attrs]
}

fn mixed_table() -> FeatureTable {
    let rows = vec![
        row("1", "snoRNA", "100", "ID=gene:A;Name=SNORD1;biotype=snoRNA"),
        row("22", "gene", "200", "ID=gene:B;Name=TP53"),
        row("X", "snoRNA", "300", "ID=gene:C;biotype=snoRNA"),
        row("Y", "miRNA", "400", "Name=MIR1"),
        row("MT", "snoRNA", "500", "Name=MTSNO"),
        row("CHR_HSCHR1_1_CTG3", "snoRNA", "600", "Name=PATCH"),
        row("GL000009.2", "gene", "700", "Name=SCAFFOLD"),
        row("x", "snoRNA", "800", "Name=LOWER"),
        row("23", "snoRNA", "900", "Name=TWENTYTHREE"),
        row("chrX", "snoRNA", "1000", "Name=PREFIXED"),
    ];
    FeatureTable::from_columns("g", &header(), &rows).unwrap()
}

fn sample_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("sample.gff3")
}

// -------------------------------------------------------------------------
// 1. Filter properties
// -------------------------------------------------------------------------

mod test_filters {
    use super::*;

    #[test]
    fn test_filter_monotonicity_all_comparators() {
        let table = mixed_table();
        for comparator in [
            Comparator::Eq,
            Comparator::Ne,
            Comparator::Lt,
            Comparator::Le,
            Comparator::Gt,
            Comparator::Ge,
        ] {
            let filtered = table.filtered(Column::Start, "500", comparator).unwrap();
            assert!(filtered.len() <= table.len());
            for r in filtered.rows() {
                assert!(comparator.holds(r.start.cmp(&500)), "{:?} {}", comparator, r.start);
            }
        }
    }

    #[test]
    fn test_eq_and_ne_partition_rows() {
        let table = mixed_table();
        let eq = table.filtered(Column::Type, "snoRNA", Comparator::Eq).unwrap();
        let ne = table.filtered(Column::Type, "snoRNA", Comparator::Ne).unwrap();
        assert_eq!(eq.len() + ne.len(), table.len());
        assert_eq!(eq.len(), 7);
    }

    #[test]
    fn test_filter_on_missing_value_keeps_nothing() {
        let table = mixed_table();
        let none = table.filtered_eq(Column::Source, "RefSeq").unwrap();
        assert!(none.is_empty());
        assert_eq!(none.name(), "g--source-RefSeq");
    }

    #[test]
    fn test_filter_strand_as_text() {
        let table = mixed_table();
        assert_eq!(table.filtered_eq(Column::Strand, "+").unwrap().len(), table.len());
        assert!(table.filtered_eq(Column::Strand, "-").unwrap().is_empty());
    }
}

// -------------------------------------------------------------------------
// 2. Assembled chromosomes
// -------------------------------------------------------------------------

mod test_assembled {
    use super::*;

    #[test]
    fn test_assembled_set() {
        assert_eq!(ASSEMBLED_SEQIDS.len(), 25);
        assert!(ASSEMBLED_SEQIDS.contains(&"1"));
        assert!(ASSEMBLED_SEQIDS.contains(&"22"));
        assert!(ASSEMBLED_SEQIDS.contains(&"MT"));
        assert!(!ASSEMBLED_SEQIDS.contains(&"23"));
        assert!(!ASSEMBLED_SEQIDS.contains(&"M"));
    }

    #[test]
    fn test_assembled_closure() {
        let a = mixed_table().assembled();
        let seqids: Vec<&str> = a.rows().iter().map(|r| r.seqid.as_str()).collect();
        assert_eq!(seqids, vec!["1", "22", "X", "Y", "MT"]);
    }

    #[test]
    fn test_assembled_is_case_sensitive_and_exact() {
        let a = mixed_table().assembled();
        assert!(a.rows().iter().all(|r| r.seqid != "x"));
        assert!(a.rows().iter().all(|r| r.seqid != "chrX"));
    }

    #[test]
    fn test_assembled_idempotent() {
        let once = mixed_table().assembled();
        let twice = once.assembled();
        assert_eq!(once.rows(), twice.rows());
        assert_eq!(twice.name(), "g--a--a");
    }
}

// -------------------------------------------------------------------------
// 3. Annotation
// -------------------------------------------------------------------------

mod test_annotation {
    use super::*;

    #[test]
    fn test_attribute_examples() {
        assert_eq!(gene_name("ID=gene:X;Name=SNORD1;biotype=snoRNA"), "SNORD1");
        assert_eq!(gene_name("ID=gene:Y;biotype=snoRNA"), "");
    }

    #[test]
    fn test_malformed_attributes_degrade_to_empty() {
        for attrs in ["", ";", "Name", "Nam=", "=Name=X", "ID;;;", "N;a;m;e;="] {
            assert_eq!(gene_name(attrs), "", "input {:?}", attrs);
        }
    }

    #[test]
    fn test_annotation_totality() {
        let table = mixed_table();
        let annotated = table.with_gene_annotation();
        assert_eq!(annotated.len(), table.len());
        assert!(annotated.rows().iter().all(|r| r.gene.is_some()));
        assert_eq!(annotated.rows()[2].gene.as_deref(), Some(""));
    }

    #[test]
    fn test_annotation_adds_exactly_gene_column() {
        let table = mixed_table();
        let annotated = table.with_gene_annotation();
        let mut expected = table.columns();
        expected.push(Column::Gene);
        assert_eq!(annotated.columns(), expected);
    }

    #[test]
    fn test_parent_is_not_mutated() {
        let table = mixed_table();
        let snapshot = table.clone();
        let _ = table.with_gene_annotation();
        let _ = table.assembled();
        let _ = table.filtered_eq(Column::Type, "gene").unwrap();
        assert_eq!(table, snapshot);
    }
}

// -------------------------------------------------------------------------
// 4. Name lineage
// -------------------------------------------------------------------------

mod test_lineage {
    use super::*;

    #[test]
    fn test_name_lineage_chain() {
        let g = mixed_table();
        let a = g.assembled();
        assert_eq!(a.name(), "g--a");
        let names = a.with_gene_annotation();
        assert_eq!(names.name(), "g--a--names");
        let snos = names.filtered_eq(Column::Type, "snoRNA").unwrap();
        assert_eq!(snos.name(), "g--a--names--type-snoRNA");
    }

    #[test]
    fn test_name_equals_base_plus_lineage_suffixes() {
        let t = mixed_table()
            .filtered(Column::End, "5000", Comparator::Le)
            .unwrap()
            .with_gene_annotation()
            .filtered(Column::Gene, "", Comparator::Ne)
            .unwrap();
        let rebuilt: String = std::iter::once("g".to_string())
            .chain(t.lineage().iter().map(Operation::suffix))
            .collect();
        assert_eq!(t.name(), rebuilt);
        assert_eq!(t.name(), "g--end-le-5000--names--gene-ne-");
    }
}

// -------------------------------------------------------------------------
// 5. BED projection
// -------------------------------------------------------------------------

mod test_bed {
    use super::*;

    #[test]
    fn test_projection_example() {
        let rows = vec![vec![
            "1", "ensembl", "snoRNA", "100", "200", ".", "+", ".", "ID=gene:X;Name=SNORD1",
        ]];
        let table = FeatureTable::from_columns("g", &header(), &rows)
            .unwrap()
            .with_gene_annotation();
        let bed = project(&table).unwrap();
        assert_eq!(bed.len(), 1);
        assert_eq!(bed[0].chrom, "chr1");
        assert_eq!(bed[0].chrom_start, 100);
        assert_eq!(bed[0].chrom_end, 200);
        assert_eq!(bed[0].name, "SNORD1");
        assert_eq!(format_bed_line(&bed[0]), "chr1\t100\t200\tSNORD1");
    }

    #[test]
    fn test_projection_without_annotation_fails() {
        let result = project(&mixed_table());
        assert!(matches!(result, Err(FeatureError::MissingColumn(ref c)) if c == "gene"));
    }

    #[test]
    fn test_round_trip_row_count() {
        let table = mixed_table().with_gene_annotation();
        let bed = project(&table).unwrap();
        let mut out = Vec::new();
        let written = write_bed(&mut out, &bed).unwrap();
        assert_eq!(written, table.len());

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(BED_HEADER));
        assert_eq!(lines.count(), table.len());
    }
}

// -------------------------------------------------------------------------
// 6. Loading from disk
// -------------------------------------------------------------------------

mod test_loading {
    use super::*;

    #[test]
    fn test_parse_sample_file() {
        let table = parse_gff3(&sample_path(), "humanGenome", &[]).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.name(), "humanGenome");
        assert!(table.sources().contains("mirbase"));
        assert_eq!(table.rows()[6].score, "0.5");
        assert_eq!(table.rows()[6].phase, "0");
    }

    #[test]
    fn test_parse_sample_file_with_sources() {
        let sources = vec!["ensembl".to_string(), "havana".to_string()];
        let table = parse_gff3(&sample_path(), "hg", &sources).unwrap();
        let found: Vec<String> = table.sources().into_iter().collect();
        assert_eq!(found, vec!["ensembl", "havana"]);
        assert_eq!(table.len(), 5);
    }
}
