//! Parsing of whole documents into annotated sentences.
use std::io::{Read, Write};

use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::annotator::{Labels, Letter, LetterAnnotator};
use crate::config::{ExcessMarks, MarkOrder, TrailingBuffer};
use crate::diacritics::is_diacritic;
use crate::errors::{NikudError, Result};
use crate::letters::is_hebrew_letter;
use crate::reconstruct;
use crate::segmenter::TextSegmenter;

/// Magic bytes identifying a serialized corpus.
pub const ARCHIVE_MAGIC: &[u8] = b"NikudCorpusRkyv 0.1\n";

const ARCHIVE_MAGIC_LEN: usize = ARCHIVE_MAGIC.len();

/// A sentence split into base letters and their labels.
#[derive(Clone, Debug, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    normalized: String,
    letters: Vec<Letter>,
    original: String,
}

impl AnnotatedSentence {
    /// Gets the text mapped onto the vocabulary, one character per letter.
    #[inline(always)]
    pub fn normalized_text(&self) -> &str {
        &self.normalized
    }

    /// Gets the labeled letters.
    #[inline(always)]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Gets the input text with every diacritic mark removed.
    #[inline(always)]
    pub fn original_text(&self) -> &str {
        &self.original
    }

    /// Gets the number of letters.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Gets the label triples in the `[nikud, dagesh, sin]` layout.
    pub fn label_rows(&self) -> Vec<[i16; 3]> {
        self.letters.iter().map(|l| l.labels().to_array()).collect()
    }

    /// Re-applies the sentence's own labels to its original text.
    pub fn diacritized(&self) -> Result<String> {
        let labels: Vec<Labels> = self.letters.iter().map(Letter::labels).collect();
        reconstruct::reconstruct(&self.original, &labels, 0)
    }
}

/// Annotated sentences of one or more documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Document {
    sentences: Vec<AnnotatedSentence>,
    dropped_marks: u64,
}

impl Document {
    #[inline(always)]
    pub fn sentences(&self) -> &[AnnotatedSentence] {
        &self.sentences
    }

    pub fn into_sentences(self) -> Vec<AnnotatedSentence> {
        self.sentences
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Gets the number of diacritic marks that no letter could take.
    #[inline(always)]
    pub const fn dropped_marks(&self) -> u64 {
        self.dropped_marks
    }

    /// Moves the sentences of `other` to the end of `self`.
    pub fn append(&mut self, other: Document) {
        self.sentences.extend(other.sentences);
        self.dropped_marks += other.dropped_marks;
    }

    /// Serializes the document to a writer.
    ///
    /// # Errors
    ///
    /// This function will return an error if writing fails or the `rkyv`
    /// serialization encounters an error.
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(ARCHIVE_MAGIC)?;
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(self)?;
        wtr.write_all(&bytes)?;
        Ok(())
    }

    /// Serializes the document to a writer, compressed with zstd.
    pub fn write_zstd<W>(&self, wtr: W, level: i32) -> Result<()>
    where
        W: Write,
    {
        let mut encoder = zstd::Encoder::new(wtr, level)?;
        self.write(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }

    /// Reads a document written by [`Document::write`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read, the magic bytes mismatch,
    /// or the archive fails validation.
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut magic = [0; ARCHIVE_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if magic.as_slice() != ARCHIVE_MAGIC {
            return Err(NikudError::invalid_argument(
                "rdr",
                "The magic number of the input archive mismatches.",
            ));
        }

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned: AlignedVec = AlignedVec::with_capacity(buffer.len());
        aligned.extend_from_slice(&buffer);

        rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned).map_err(|e| {
            NikudError::invalid_state(
                "rkyv validation failed. The archive may be corrupted or incompatible.",
                e.to_string(),
            )
        })
    }

    /// Reads a document written by [`Document::write_zstd`].
    pub fn from_zstd<R: Read>(rdr: R) -> Result<Self> {
        let decoder = zstd::Decoder::new(rdr)?;
        Self::read(decoder)
    }
}

/// Parser of raw diacritized documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusParser {
    segmenter: TextSegmenter,
    annotator: LetterAnnotator,
    excess: ExcessMarks,
}

impl CorpusParser {
    /// Creates a parser with sentences of at most
    /// [`DEFAULT_MAX_LENGTH`](crate::common::DEFAULT_MAX_LENGTH) characters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the maximum sentence length in characters.
    ///
    /// # Errors
    ///
    /// [`NikudError`] is returned when `max_length` is zero.
    pub fn max_length(mut self, max_length: usize) -> Result<Self> {
        let trailing = self.segmenter.trailing_policy();
        self.segmenter = TextSegmenter::new(max_length)?.trailing(trailing);
        Ok(self)
    }

    /// Specifies what happens to the sentence still open at the end of a document.
    pub const fn trailing(mut self, trailing: TrailingBuffer) -> Self {
        self.segmenter = self.segmenter.trailing(trailing);
        self
    }

    /// Specifies what happens to marks no letter can take.
    pub const fn excess_marks(mut self, excess: ExcessMarks) -> Self {
        self.excess = excess;
        self
    }

    /// Specifies the order in which a letter's marks are offered to the slots.
    pub const fn mark_order(mut self, mark_order: MarkOrder) -> Self {
        self.annotator = self.annotator.mark_order(mark_order);
        self
    }

    #[inline(always)]
    pub const fn segmenter(&self) -> &TextSegmenter {
        &self.segmenter
    }

    /// Segments and annotates a document.
    ///
    /// # Errors
    ///
    /// [`NikudError::InvalidFormat`] is returned under [`ExcessMarks::Reject`]
    /// when a mark cannot be assigned to any letter.
    pub fn parse(&self, text: &str) -> Result<Document> {
        let mut doc = Document::default();
        let mut num_letters = 0;
        for sentence in self.segmenter.segment(text.lines()) {
            let (annotated, dropped) = self.annotate_sentence(&sentence)?;
            doc.dropped_marks += dropped as u64;
            if annotated.is_empty() {
                continue;
            }
            num_letters += annotated.len();
            doc.sentences.push(annotated);
        }
        log::debug!(
            "[nikud] parsed {} sentences ({} letters, {} marks dropped)",
            doc.len(),
            num_letters,
            doc.dropped_marks
        );
        Ok(doc)
    }

    /// Reads a UTF-8 document and parses it.
    ///
    /// # Errors
    ///
    /// Returns an error when reading fails, the bytes are not UTF-8, or
    /// [`Self::parse`] fails.
    pub fn parse_reader<R: Read>(&self, mut rdr: R) -> Result<Document> {
        let mut bytes = Vec::new();
        rdr.read_to_end(&mut bytes)?;
        let text = std::str::from_utf8(&bytes)?;
        self.parse(text)
    }

    /// Annotates one already segmented sentence.
    ///
    /// Returns the sentence and the number of marks dropped from it.
    pub fn annotate_sentence(&self, sentence: &str) -> Result<(AnnotatedSentence, usize)> {
        let chars: Vec<char> = sentence.chars().collect();
        let mut letters = Vec::with_capacity(chars.len());
        let mut normalized = String::with_capacity(sentence.len());
        let mut original = String::with_capacity(sentence.len());
        let mut dropped = 0;

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            i += 1;
            if is_diacritic(c) {
                // No base letter to attach to.
                self.on_excess(c, 1, i - 1)?;
                dropped += 1;
                continue;
            }

            let start = i;
            if is_hebrew_letter(c) {
                while i < chars.len() && is_diacritic(chars[i]) {
                    i += 1;
                }
            }
            let pending = &chars[start..i];
            let (letter, consumed) = self.annotator.annotate(c, pending);
            let excess = pending.len() - consumed;
            if excess != 0 {
                self.on_excess(c, excess, start - 1)?;
                dropped += excess;
            }

            normalized.push(letter.normalized());
            original.push(c);
            letters.push(letter);
        }

        let sentence = AnnotatedSentence {
            normalized,
            letters,
            original,
        };
        Ok((sentence, dropped))
    }

    fn on_excess(&self, c: char, count: usize, pos: usize) -> Result<()> {
        match self.excess {
            ExcessMarks::Drop => {
                log::trace!("[nikud] dropped {count} mark(s) at char {pos} ({c:?})");
                Ok(())
            }
            ExcessMarks::Warn => {
                log::warn!("[nikud] dropped {count} mark(s) at char {pos} ({c:?})");
                Ok(())
            }
            ExcessMarks::Reject => Err(NikudError::invalid_format(
                "text",
                format!("{count} diacritic mark(s) at char {pos} ({c:?}) cannot be assigned to a letter"),
            )),
        }
    }
}

/// Parses a document with the default options.
pub fn parse(text: &str) -> Result<Document> {
    CorpusParser::new().parse(text)
}
