//! seqsieve - Alignment loader and filter
//!
//! ## Usage
//!
//! ```bash
//! seqsieve alignment.aln                      # print reconstructed sequences
//! seqsieve alignment.aln --min-residues 200   # keep long sequences only
//! seqsieve alignment.aln --motif MNPQ -o out.fa
//! ```
//!
//! Sequences are written as `>name` header lines followed by the residues,
//! gaps included. Filter criteria apply to the gap-stripped residues and
//! combine with AND.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use seqsieve::model::Alignment;
use seqsieve::tabular::parse_tabular_file;

/// seqsieve - load and filter block-interleaved sequence alignments
///
/// Reads an alignment file with one "name fragment" pair per line,
/// reconstructs each sequence by concatenating its fragments in file
/// order, optionally keeps only the sequences matching the given criteria,
/// and writes the result to stdout or a file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment file to read (one "name fragment" pair per line)
    file: PathBuf,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Keep only sequences with at least this many non-gap residues
    #[arg(long = "min-residues")]
    min_residues: Option<usize>,

    /// Keep only sequences with at most this many non-gap residues
    #[arg(long = "max-residues")]
    max_residues: Option<usize>,

    /// Keep only sequences whose gap-stripped residues contain this motif
    #[arg(long = "motif")]
    motif: Option<String>,

    /// Keep only sequences whose identifier contains this substring
    #[arg(long = "id-contains")]
    id_contains: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,
}

/// Filter criteria from the command line, AND-combined into one predicate.
struct Criteria {
    min_residues: Option<usize>,
    max_residues: Option<usize>,
    motif: Option<String>,
    id_contains: Option<String>,
}

impl Criteria {
    fn from_args(args: &Args) -> Option<Self> {
        if args.min_residues.is_none()
            && args.max_residues.is_none()
            && args.motif.is_none()
            && args.id_contains.is_none()
        {
            return None;
        }
        Some(Self {
            min_residues: args.min_residues,
            max_residues: args.max_residues,
            motif: args.motif.clone(),
            id_contains: args.id_contains.clone(),
        })
    }

    /// Decides whether a sequence is kept, given its identifier and its
    /// gap-stripped residues.
    fn matches(&self, id: &str, residues: &str) -> bool {
        self.min_residues.map_or(true, |n| residues.len() >= n)
            && self.max_residues.map_or(true, |n| residues.len() <= n)
            && self.motif.as_deref().map_or(true, |m| residues.contains(m))
            && self.id_contains.as_deref().map_or(true, |s| id.contains(s))
    }
}

/// Writes each record as `>name` plus its residues, to stdout or a file.
fn write_alignment(alignment: &Alignment, output: &str) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for record in alignment {
            writeln!(handle, "{record}")?;
        }
    } else {
        let mut file = File::create(output)?;
        for record in alignment {
            writeln!(file, "{record}")?;
        }
        eprintln!("Wrote {} sequences to {}", alignment.len(), output);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    TermLogger::init(
        args.log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let alignment = parse_tabular_file(&args.file)?;
    info!(
        "loaded {} sequences from {} ({} columns at the widest)",
        alignment.len(),
        alignment.source(),
        alignment.alignment_length()
    );

    let result = match Criteria::from_args(&args) {
        Some(criteria) => alignment.filter(|id, residues| criteria.matches(id, residues)),
        None => alignment,
    };

    write_alignment(&result, &args.output)?;
    Ok(())
}
