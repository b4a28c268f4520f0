//! Rendering of label sequences back into diacritized text.
use crate::annotator::Labels;
use crate::diacritics::{char_of, Category};
use crate::errors::{NikudError, Result};

/// Writes `original` with the marks of `labels` after each character.
///
/// `labels[i + offset]` belongs to the `i`-th character of `original`; the
/// first `offset` entries are reserved slots such as a start-of-sequence
/// marker. Marks are emitted in the order nikud, dagesh, sin; `WITHOUT` and
/// `IRRELEVANT` emit nothing.
///
/// A vav relabeled as shuruk by annotation gets its dot back from the nikud
/// label, so it is rendered as it was written.
///
/// # Errors
///
/// [`NikudError`] is returned when `labels` is too short for `original` and
/// `offset`, or when a label id is outside the range of its category.
pub fn reconstruct(original: &str, labels: &[Labels], offset: usize) -> Result<String> {
    let num_chars = original.chars().count();
    if labels.len() < num_chars + offset {
        return Err(NikudError::invalid_argument(
            "labels",
            format!(
                "{} labels cannot cover {} characters after {} reserved slots.",
                labels.len(),
                num_chars,
                offset
            ),
        ));
    }

    let mut text = String::with_capacity(original.len() * 2);
    for (c, row) in original.chars().zip(&labels[offset..]) {
        text.push(c);
        for cate in Category::ALL {
            let id = row.get(cate);
            if !cate.accepts(id) {
                return Err(NikudError::invalid_argument(
                    "labels",
                    format!("{id} is not a {cate} label."),
                ));
            }
            if let Some(mark) = char_of(cate, id) {
                text.push(mark);
            }
        }
    }
    Ok(text)
}

/// Same as [`reconstruct`] for raw `[nikud, dagesh, sin]` rows, as produced
/// by a model.
pub fn reconstruct_rows(original: &str, rows: &[[i16; 3]], offset: usize) -> Result<String> {
    let labels: Vec<Labels> = rows.iter().copied().map(Labels::from).collect();
    reconstruct(original, &labels, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    use hashbrown::HashSet;

    use crate::annotator::LetterAnnotator;
    use crate::common::LEADING_PAD_SLOTS;

    const DAGESH: char = '\u{05BC}';
    const KAMATZ: char = '\u{05B8}';
    const RAFE: char = '\u{05BF}';
    const SIN_DOT: char = '\u{05C2}';

    #[test]
    fn test_roundtrip_bet() {
        let annotator = LetterAnnotator::new();
        for marks in [[DAGESH, KAMATZ], [KAMATZ, DAGESH]] {
            let (letter, _) = annotator.annotate('ב', &marks);
            let text = reconstruct("ב", &[letter.labels()], 0).unwrap();
            let got: HashSet<char> = text.chars().collect();
            let expected: HashSet<char> = ['ב', DAGESH, KAMATZ].into_iter().collect();
            assert_eq!(got, expected);
            assert_eq!(text, format!("ב{KAMATZ}{DAGESH}"));
        }
    }

    #[test]
    fn test_vav_shuruk() {
        let (letter, _) = LetterAnnotator::new().annotate('ו', &[DAGESH]);
        let text = reconstruct("ו", &[letter.labels()], 0).unwrap();
        assert_eq!(text, format!("ו{DAGESH}"));
        assert!(!text.contains(RAFE));
    }

    #[test]
    fn test_rafe_roundtrip() {
        let (letter, _) = LetterAnnotator::new().annotate('ב', &[RAFE]);
        let text = reconstruct("ב", &[letter.labels()], 0).unwrap();
        assert_eq!(text, format!("ב{RAFE}"));
    }

    #[test]
    fn test_shin_order() {
        let (letter, _) = LetterAnnotator::new().annotate('ש', &[SIN_DOT, KAMATZ]);
        let text = reconstruct("ש", &[letter.labels()], 0).unwrap();
        assert_eq!(text, format!("ש{KAMATZ}{SIN_DOT}"));
    }

    #[test]
    fn test_offset_skips_pad() {
        let (letter, _) = LetterAnnotator::new().annotate('ב', &[KAMATZ]);
        let labels = [Labels::IRRELEVANT, letter.labels(), Labels::IRRELEVANT, Labels::IRRELEVANT];
        let err = reconstruct("ב 1x", &labels, LEADING_PAD_SLOTS).unwrap_err();
        assert!(matches!(err, NikudError::InvalidArgument(_)));

        let text = reconstruct("ב ", &labels, LEADING_PAD_SLOTS).unwrap();
        assert_eq!(text, format!("ב{KAMATZ} "));
    }

    #[test]
    fn test_sentinels_emit_nothing() {
        let rows = [[-1, -1, -1], [18, 2, 3]];
        assert_eq!(reconstruct_rows("אב", &rows, 0).unwrap(), "אב");
    }

    #[test]
    fn test_rejects_out_of_range_ids() {
        assert!(reconstruct_rows("ב", &[[19, -1, -1]], 0).is_err());
        assert!(reconstruct_rows("ב", &[[0, 3, -1]], 0).is_err());
        assert!(reconstruct_rows("ב", &[[0, 0, -2]], 0).is_err());
    }

    #[test]
    fn test_empty() {
        assert_eq!(reconstruct("", &[], 0).unwrap(), "");
        assert!(reconstruct("", &[], 1).is_err());
    }
}
