use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use nikud::Document;
use nikud::common::SENTENCE_SEPARATOR;
use nikud::errors::NikudError;

#[derive(Parser, Debug)]
#[clap(
    name = "restore",
    about = "Prints the sentences of a corpus archive re-diacritized from their labels."
)]
pub struct Args {
    /// Corpus archive produced by the build command.
    #[clap(short = 'i', long)]
    corpus_in: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Restoration failed: {0}")]
    Nikud(#[from] NikudError),
}

pub fn run(args: Args) -> Result<(), RestoreError> {
    let doc = Document::from_zstd(BufReader::new(File::open(&args.corpus_in)?))?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_restored(&doc, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes every sentence followed by a separator line, so that the output can
/// be parsed again into the same sentences.
pub fn write_restored<W>(doc: &Document, wtr: &mut W) -> Result<(), RestoreError>
where
    W: Write,
{
    for sentence in doc.sentences() {
        writeln!(wtr, "{}", sentence.diacritized()?)?;
        writeln!(wtr, "{SENTENCE_SEPARATOR}")?;
    }
    Ok(())
}
