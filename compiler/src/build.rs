use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use walkdir::WalkDir;

use nikud::errors::NikudError;
use nikud::{CorpusParser, Document};

use crate::options::ParserArgs;

#[derive(Parser, Debug)]
#[clap(
    name = "build",
    about = "A program to build a corpus archive from diacritized text."
)]
pub struct Args {
    /// Diacritized text files, or directories searched recursively for `*.txt` files.
    #[clap(short = 'i', long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// File to which the corpus archive is output (in zstd).
    #[clap(short = 'o', long)]
    corpus_out: PathBuf,

    /// Compression level of zstd.
    #[clap(long, default_value = "19")]
    level: i32,

    /// Number of threads. All CPUs are used if not specified.
    #[clap(long)]
    threads: Option<usize>,

    #[clap(flatten)]
    parser: ParserArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("No input text file was found.")]
    NoInput,

    #[error("Invalid compression level {0}: it must be in {1:?}.")]
    InvalidLevel(i32, RangeInclusive<i32>),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to walk the input directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to create the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Corpus building failed: {0}")]
    Nikud(#[from] NikudError),
}

pub fn run(args: Args) -> Result<(), BuildError> {
    let levels = zstd::compression_level_range();
    if !levels.contains(&args.level) {
        return Err(BuildError::InvalidLevel(args.level, levels));
    }
    let parser = args.parser.to_parser()?;

    let paths = collect_inputs(&args.inputs)?;
    if paths.is_empty() {
        return Err(BuildError::NoInput);
    }

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = args.threads {
        pool = pool.num_threads(threads);
    }
    let pool = pool.build()?;

    println!("Parsing {} files...", paths.len());
    let (doc, failures) = pool.install(|| build_corpus(&parser, &paths));
    for (path, e) in &failures {
        eprintln!("Skipped {}: {e}", path.display());
    }
    println!(
        "Parsed {} sentences ({} marks dropped)",
        doc.len(),
        doc.dropped_marks()
    );

    println!("Writing the corpus archive...");
    let file = File::create(&args.corpus_out)?;
    doc.write_zstd(BufWriter::new(file), args.level)?;

    println!("Successfully built the corpus to {}", args.corpus_out.display());
    Ok(())
}

/// Expands directories into the `*.txt` files below them, in file name order.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, BuildError> {
    let mut paths = vec![];
    for input in inputs {
        if !input.is_dir() {
            paths.push(input.clone());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "txt") {
                paths.push(entry.into_path());
            }
        }
    }
    Ok(paths)
}

fn parse_file(parser: &CorpusParser, path: &Path) -> Result<Document, NikudError> {
    let file = File::open(path)?;
    parser.parse_reader(BufReader::new(file))
}

/// Parses the files in parallel and concatenates their sentences in input order.
///
/// Files that fail to parse are left out and returned with their errors.
pub fn build_corpus(parser: &CorpusParser, paths: &[PathBuf]) -> (Document, Vec<(PathBuf, NikudError)>) {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| parse_file(parser, path))
        .collect();

    let mut doc = Document::default();
    let mut failures = vec![];
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(parsed) => doc.append(parsed),
            Err(e) => failures.push((path.clone(), e)),
        }
    }
    (doc, failures)
}
