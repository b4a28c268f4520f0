use clap::Parser;

use nikud::common::DEFAULT_MAX_LENGTH;
use nikud::errors::NikudError;
use nikud::{CorpusParser, ExcessMarks, MarkOrder, TrailingBuffer};

/// Options shared by the subcommands that parse raw text.
#[derive(Parser, Debug, Clone)]
pub struct ParserArgs {
    /// Maximum number of characters in a sentence.
    #[clap(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Emit the sentence still open at the end of each document (default).
    #[clap(long, conflicts_with = "drop_trailing")]
    keep_trailing: bool,

    /// Discard the sentence still open at the end of each document, as older
    /// corpora did.
    #[clap(long)]
    drop_trailing: bool,

    /// What to do with marks no letter can take: drop, warn or reject.
    #[clap(long, default_value = "drop")]
    excess: String,

    /// Order in which a letter's marks fill the slots: canonical or as-written.
    #[clap(long, default_value = "canonical")]
    mark_order: String,
}

impl ParserArgs {
    /// Builds the parser described by the options.
    pub fn to_parser(&self) -> Result<CorpusParser, NikudError> {
        let trailing = if self.drop_trailing && !self.keep_trailing {
            TrailingBuffer::Drop
        } else {
            TrailingBuffer::Flush
        };
        let parser = CorpusParser::new()
            .max_length(self.max_length)?
            .trailing(trailing)
            .excess_marks(self.excess.parse::<ExcessMarks>()?)
            .mark_order(self.mark_order.parse::<MarkOrder>()?);
        Ok(parser)
    }
}
