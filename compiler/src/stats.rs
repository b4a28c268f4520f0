use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;

use nikud::errors::NikudError;
use nikud::{Document, LabelHistogram};

#[derive(Parser, Debug)]
#[clap(
    name = "stats",
    about = "Prints the label distribution of a corpus archive."
)]
pub struct Args {
    /// Corpus archive produced by the build command.
    #[clap(short = 'i', long)]
    corpus_in: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read the corpus: {0}")]
    Nikud(#[from] NikudError),
}

pub fn run(args: Args) -> Result<(), StatsError> {
    println!("Loading the corpus...");
    let doc = Document::from_zstd(BufReader::new(File::open(&args.corpus_in)?))?;

    let mut hist = LabelHistogram::new();
    hist.add_document(&doc);

    println!("sentences\t{}", doc.len());
    println!("dropped_marks\t{}", doc.dropped_marks());
    print!("{hist}");
    Ok(())
}
