//! Policies controlling segmentation and annotation.
use std::fmt;
use std::str::FromStr;

use crate::errors::NikudError;

/// What to do with the sentence still being accumulated at the end of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBuffer {
    /// Emit it as the last sentence.
    #[default]
    Flush,
    /// Discard it. Older corpora were produced this way.
    Drop,
}

/// What to do with diacritic marks that no category slot consumes.
///
/// This covers a fourth mark on one letter as well as marks that follow a
/// non-Hebrew character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcessMarks {
    /// Drop them silently.
    #[default]
    Drop,
    /// Drop them and emit a warning through `log`.
    Warn,
    /// Fail the document with [`NikudError::InvalidFormat`].
    Reject,
}

/// Order in which a letter's marks are fed to the category slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkOrder {
    /// Stably sort the marks by the first slot that can take them, so that
    /// "dagesh, vowel" and "vowel, dagesh" spellings are labeled alike.
    #[default]
    Canonical,
    /// Feed the marks in the order they were written.
    AsWritten,
}

impl fmt::Display for TrailingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailingBuffer::Flush => write!(f, "flush"),
            TrailingBuffer::Drop => write!(f, "drop"),
        }
    }
}

impl fmt::Display for ExcessMarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcessMarks::Drop => write!(f, "drop"),
            ExcessMarks::Warn => write!(f, "warn"),
            ExcessMarks::Reject => write!(f, "reject"),
        }
    }
}

impl fmt::Display for MarkOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkOrder::Canonical => write!(f, "canonical"),
            MarkOrder::AsWritten => write!(f, "as-written"),
        }
    }
}

impl FromStr for ExcessMarks {
    type Err = NikudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Self::Drop),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            _ => Err(NikudError::invalid_argument(
                "excess",
                format!("unknown policy `{s}` (expected drop, warn or reject)"),
            )),
        }
    }
}

impl FromStr for MarkOrder {
    type Err = NikudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canonical" => Ok(Self::Canonical),
            "as-written" => Ok(Self::AsWritten),
            _ => Err(NikudError::invalid_argument(
                "mark_order",
                format!("unknown order `{s}` (expected canonical or as-written)"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(TrailingBuffer::default(), TrailingBuffer::Flush);
        assert_eq!(ExcessMarks::default(), ExcessMarks::Drop);
        assert_eq!(MarkOrder::default(), MarkOrder::Canonical);
    }

    #[test]
    fn test_parse_roundtrip() {
        for p in [ExcessMarks::Drop, ExcessMarks::Warn, ExcessMarks::Reject] {
            assert_eq!(p.to_string().parse::<ExcessMarks>().unwrap(), p);
        }
        for o in [MarkOrder::Canonical, MarkOrder::AsWritten] {
            assert_eq!(o.to_string().parse::<MarkOrder>().unwrap(), o);
        }
        assert!("loud".parse::<ExcessMarks>().is_err());
    }
}
