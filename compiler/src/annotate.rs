use std::io::{self, BufWriter, Write};

use clap::Parser;

use nikud::Document;
use nikud::diacritics::{label_name, Category};
use nikud::errors::NikudError;

use crate::options::ParserArgs;

#[derive(Parser, Debug)]
#[clap(
    name = "annotate",
    about = "Annotates diacritized text from stdin and prints the labels of each letter."
)]
pub struct Args {
    /// Print label names instead of label ids.
    #[clap(long)]
    names: bool,

    #[clap(flatten)]
    parser: ParserArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Annotation failed: {0}")]
    Nikud(#[from] NikudError),
}

pub fn run(args: Args) -> Result<(), AnnotateError> {
    let parser = args.parser.to_parser()?;
    let doc = parser.parse_reader(io::stdin().lock())?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_annotations(&doc, args.names, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes one block per sentence: a `#` line with the normalized text, then one
/// tab-separated line per letter (raw, normalized, nikud, dagesh, sin).
pub fn write_annotations<W>(doc: &Document, names: bool, wtr: &mut W) -> io::Result<()>
where
    W: Write,
{
    for sentence in doc.sentences() {
        writeln!(wtr, "# {}", sentence.normalized_text().replace('\n', " "))?;
        for letter in sentence.letters() {
            write!(wtr, "{:?}\t{:?}", letter.raw(), letter.normalized())?;
            let labels = letter.labels();
            for cate in Category::ALL {
                let id = labels.get(cate);
                if names {
                    write!(wtr, "\t{}", label_name(cate, id))?;
                } else {
                    write!(wtr, "\t{id}")?;
                }
            }
            writeln!(wtr)?;
        }
        writeln!(wtr)?;
    }
    Ok(())
}
