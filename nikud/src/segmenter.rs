//! Length-bounded sentence segmentation.
//!
//! Lines are scanned once, left to right. Lines without any diacritic carry no
//! training content and are skipped, except for the separator line which closes
//! the current sentence. Short diacritized lines are merged into sentences of at
//! most `max_length` characters; longer ones are first split at sentence
//! punctuation, and pieces that are still too long are cut at word boundaries.
use std::sync::LazyLock;

use regex::Regex;

use crate::common::{DEFAULT_MAX_LENGTH, SENTENCE_SEPARATOR};
use crate::config::TrailingBuffer;
use crate::diacritics::contains_diacritic;
use crate::errors::{NikudError, Result};

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.?!”]) ").expect("sentence boundary pattern is valid"));

/// Splitter and merger of document lines.
#[derive(Debug, Clone, Copy)]
pub struct TextSegmenter {
    max_length: usize,
    trailing: TrailingBuffer,
}

impl Default for TextSegmenter {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            trailing: TrailingBuffer::default(),
        }
    }
}

impl TextSegmenter {
    /// Creates a segmenter producing sentences of at most `max_length` characters.
    ///
    /// # Errors
    ///
    /// [`NikudError`] is returned when `max_length` is zero.
    pub fn new(max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(NikudError::invalid_argument(
                "max_length",
                "must be a positive number of characters.",
            ));
        }
        Ok(Self {
            max_length,
            trailing: TrailingBuffer::default(),
        })
    }

    /// Specifies what happens to the sentence still open at the end of input.
    pub const fn trailing(mut self, trailing: TrailingBuffer) -> Self {
        self.trailing = trailing;
        self
    }

    #[inline(always)]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    #[inline(always)]
    pub const fn trailing_policy(&self) -> TrailingBuffer {
        self.trailing
    }

    /// Segments `lines` into sentences.
    pub fn segment<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut acc = Accumulator::new(self);
        let mut num_lines = 0;
        for line in lines {
            acc.push_line(line.as_ref());
            num_lines += 1;
        }
        let sentences = acc.finish();
        log::debug!(
            "[nikud] segmented {} lines into {} sentences",
            num_lines,
            sentences.len()
        );
        sentences
    }

    /// Splits an over-long line into pieces of at most `max_length` characters.
    ///
    /// The line is first broken after `.`, `?`, `!` and `”` followed by a space,
    /// and at tabs. A piece still too long is cut at the last space inside each
    /// `max_length` window (the space is dropped), or blindly when the window
    /// holds no usable space.
    pub fn split_oversized(&self, line: &str) -> Vec<String> {
        let marked = SENTENCE_END.replace_all(line, "${1}\n");
        let mut pieces = vec![];
        for part in marked.split(['\n', '\t']) {
            if part.chars().count() <= self.max_length {
                pieces.push(part.to_string());
            } else {
                self.hard_cut(part, &mut pieces);
            }
        }
        pieces
    }

    fn hard_cut(&self, part: &str, pieces: &mut Vec<String>) {
        let chars: Vec<char> = part.chars().collect();
        let mut start = 0;
        while chars.len() - start > self.max_length {
            let window = &chars[start..start + self.max_length];
            match window.iter().rposition(|&c| c == ' ') {
                Some(space) if space > 0 => {
                    pieces.push(window[..space].iter().collect());
                    start += space + 1;
                }
                _ => {
                    pieces.push(window.iter().collect());
                    start += self.max_length;
                }
            }
        }
        if start < chars.len() {
            pieces.push(chars[start..].iter().collect());
        }
    }
}

/// State of one segmentation pass.
struct Accumulator<'a> {
    segmenter: &'a TextSegmenter,
    buffer: String,
    buffer_len: usize,
    sentences: Vec<String>,
}

impl<'a> Accumulator<'a> {
    const fn new(segmenter: &'a TextSegmenter) -> Self {
        Self {
            segmenter,
            buffer: String::new(),
            buffer_len: 0,
            sentences: vec![],
        }
    }

    fn push_line(&mut self, line: &str) {
        if !contains_diacritic(line) {
            if line == SENTENCE_SEPARATOR {
                self.flush();
            }
            return;
        }

        let len = line.chars().count();
        if len > self.segmenter.max_length {
            // Every piece fits, so this recurses only once.
            for piece in self.segmenter.split_oversized(line) {
                self.push_line(&piece);
            }
            return;
        }

        if self.buffer.is_empty() {
            self.buffer.push_str(line);
            self.buffer_len = len;
        } else if self.buffer_len + len < self.segmenter.max_length {
            self.buffer.push('\n');
            self.buffer.push_str(line);
            self.buffer_len += len + 1;
        } else {
            self.flush();
            self.buffer.push_str(line);
            self.buffer_len = len;
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.sentences.push(std::mem::take(&mut self.buffer));
            self.buffer_len = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        match self.segmenter.trailing {
            TrailingBuffer::Flush => self.flush(),
            TrailingBuffer::Drop => {
                if !self.buffer.is_empty() {
                    log::debug!(
                        "[nikud] dropping trailing sentence of {} characters",
                        self.buffer_len
                    );
                }
            }
        }
        self.sentences
    }
}
