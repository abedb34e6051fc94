//! CLI entry point for snobed.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use snobed::config::Config;
use snobed::parser::parse_gff3;
use snobed::pipeline;
use snobed::table::FeatureTable;

/// GFF3 to BED exporter.
///
/// Loads a GFF3 annotation, keeps features on assembled chromosomes,
/// names them after their `Name=` attribute and writes one feature type
/// to `<name>.bed`.
#[derive(Parser, Debug)]
#[command(name = "snobed")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GFF3 annotation file, plain or .gz (read from stdin if omitted)
    input: Option<PathBuf>,

    /// Base name of the loaded table
    #[arg(short = 'n', long = "name", default_value = "humanGenome")]
    name: String,

    /// Sources to keep (comma-separated, empty keeps all)
    #[arg(short = 's', long = "sources", default_value = "ensembl,havana,ensembl_havana")]
    sources: String,

    /// Feature type to export
    #[arg(short = 't', long = "type", default_value = "snoRNA")]
    feature_type: String,

    /// Directory to write the BED file into
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Keep features on unplaced scaffolds and patches
    #[arg(long = "keep-unassembled")]
    keep_unassembled: bool,

    /// Print seqids, types and sources of the loaded table instead of exporting
    #[arg(long = "summary")]
    summary: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => path.clone(),
        None => read_path_from_stdin()?,
    };
    if !input.exists() {
        bail!("GFF3 file not found: {}", input.display());
    }
    if !args.output_dir.is_dir() {
        bail!("Output directory not found: {}", args.output_dir.display());
    }

    let mut config = Config::new();
    config.name = args.name.clone();
    config.parse_sources(&args.sources);
    config.feature_type = args.feature_type.clone();
    config.output_dir = args.output_dir.clone();
    config.assembled_only = !args.keep_unassembled;

    info!("Loading data from {}...", input.display());
    let loaded = parse_gff3(&input, &config.name, &config.sources)?;
    info!("Constructing features table '{}' ({} rows)", loaded.name(), loaded.len());

    if args.summary {
        return print_summary(&loaded);
    }

    let report = pipeline::run(&config, &loaded)?;
    match report.path {
        Some(path) => info!("Wrote {} features to {}", report.rows, path.display()),
        None => bail!("Nothing written for table '{}'", report.name),
    }

    Ok(())
}

/// Log at info by default; `RUST_LOG` overrides.
fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn read_path_from_stdin() -> Result<PathBuf> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input path from stdin")?;
    let path = line.trim();
    if path.is_empty() {
        bail!("No input file given");
    }
    Ok(PathBuf::from(path))
}

fn print_summary(table: &FeatureTable) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let join = |values: indexmap::IndexSet<String>| values.into_iter().collect::<Vec<_>>().join(",");

    writeln!(out, "seqids\t{}", join(table.seq_ids()))?;
    writeln!(out, "types\t{}", join(table.types()))?;
    writeln!(out, "sources\t{}", join(table.sources()))?;
    out.flush()?;
    Ok(())
}
