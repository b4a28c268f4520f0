//! Common settings.

/// The default maximum length of a segmented sentence, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// A line consisting of exactly this text closes the sentence being accumulated.
pub const SENTENCE_SEPARATOR: &str = "------------------";

/// Number of reserved slots in front of model label sequences
/// (the start-of-sequence marker).
pub const LEADING_PAD_SLOTS: usize = 1;
