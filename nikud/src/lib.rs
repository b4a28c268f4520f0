//! # Nikud
//!
//! Nikud decomposes diacritized Hebrew text into base letters and per-letter
//! labels for three independent diacritic categories: vowel points (nikud),
//! the gemination dot (dagesh), and the shin/sin dots. The resulting corpus is
//! meant for training and evaluating diacritization models, and label
//! sequences predicted by such a model can be rendered back into text.
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nikud::CorpusParser;
//!
//! // "בָּרָא"
//! let text = "\u{5D1}\u{5BC}\u{5B8}\u{5E8}\u{5B8}\u{5D0}";
//!
//! let doc = CorpusParser::new().parse(text)?;
//! assert_eq!(doc.len(), 1);
//!
//! let sentence = &doc.sentences()[0];
//! assert_eq!(sentence.original_text(), "ברא");
//! assert_eq!(sentence.normalized_text(), "ברא");
//! assert_eq!(
//!     sentence.label_rows(),
//!     vec![[8, 1, -1], [8, -1, -1], [18, -1, -1]],
//! );
//!
//! // Marks come back in nikud, dagesh, sin order.
//! assert_eq!(
//!     sentence.diacritized()?,
//!     "\u{5D1}\u{5B8}\u{5BC}\u{5E8}\u{5B8}\u{5D0}",
//! );
//!
//! let mut buffer = Vec::new();
//! doc.write(&mut buffer)?;
//! assert_eq!(nikud::Document::read(buffer.as_slice())?, doc);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod annotator;
pub mod common;
pub mod config;
pub mod corpus;
pub mod diacritics;
pub mod errors;
pub mod letters;
pub mod reconstruct;
pub mod segmenter;
pub mod stats;


pub use annotator::{Labels, Letter, LetterAnnotator};
pub use config::{ExcessMarks, MarkOrder, TrailingBuffer};
pub use corpus::{AnnotatedSentence, CorpusParser, Document};
pub use diacritics::{Category, Diacritic, LabelId};
pub use reconstruct::reconstruct;
pub use segmenter::TextSegmenter;
pub use stats::LabelHistogram;

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
