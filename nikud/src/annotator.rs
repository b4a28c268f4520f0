//! Per-letter labeling.
//!
//! A base letter is followed by a short run of combining marks. The annotator
//! walks that run with a cursor, offering the next mark to each category slot
//! in [`Category::ANNOTATION_ORDER`]. A slot takes the mark when the letter is
//! eligible for the category and [`Category::takes`] the mark; otherwise the
//! slot is labeled `WITHOUT` (eligible) or `IRRELEVANT` (not eligible) and the
//! cursor stays put.
use std::borrow::Cow;

use rkyv::{Archive, Deserialize, Serialize};

use crate::config::MarkOrder;
use crate::diacritics::{Category, Diacritic, LabelId};
use crate::letters;

/// Dagesh label of the dagesh/shuruk dot.
pub(crate) const DAGESH_ID: LabelId = LabelId(1);

/// Nikud label of the dagesh/shuruk dot, read as the vowel shuruk.
pub(crate) const SHURUK_ID: LabelId = LabelId(13);

const VAV: char = 'ו';

/// Labels of one letter, one per category.
#[derive(
    Clone, Copy, Eq, PartialEq, Debug, Hash,
    Archive, Serialize, Deserialize,
)]
#[rkyv(derive(Debug))]
pub struct Labels {
    pub nikud: LabelId,
    pub dagesh: LabelId,
    pub sin: LabelId,
}

impl Labels {
    /// Labels of a position where no category applies (or a padding slot).
    pub const IRRELEVANT: Self = Self {
        nikud: LabelId::IRRELEVANT,
        dagesh: LabelId::IRRELEVANT,
        sin: LabelId::IRRELEVANT,
    };

    /// Gets the label of `cate`.
    #[inline(always)]
    pub const fn get(&self, cate: Category) -> LabelId {
        match cate {
            Category::Nikud => self.nikud,
            Category::Dagesh => self.dagesh,
            Category::Sin => self.sin,
        }
    }

    #[inline(always)]
    fn set(&mut self, cate: Category, id: LabelId) {
        match cate {
            Category::Nikud => self.nikud = id,
            Category::Dagesh => self.dagesh = id,
            Category::Sin => self.sin = id,
        }
    }

    /// Gets the raw ids laid out as `[nikud, dagesh, sin]`.
    #[inline(always)]
    pub const fn to_array(&self) -> [i16; 3] {
        [self.nikud.get(), self.dagesh.get(), self.sin.get()]
    }
}

impl From<[i16; 3]> for Labels {
    fn from([nikud, dagesh, sin]: [i16; 3]) -> Self {
        Self {
            nikud: LabelId(nikud),
            dagesh: LabelId(dagesh),
            sin: LabelId(sin),
        }
    }
}

/// A labeled letter.
#[derive(
    Clone, Copy, Eq, PartialEq, Debug,
    Archive, Serialize, Deserialize,
)]
#[rkyv(derive(Debug))]
pub struct Letter {
    raw: char,
    normalized: char,
    labels: Labels,
}

impl Letter {
    /// Gets the character as it appeared in the input.
    #[inline(always)]
    pub const fn raw(&self) -> char {
        self.raw
    }

    /// Gets the character mapped onto the vocabulary.
    #[inline(always)]
    pub const fn normalized(&self) -> char {
        self.normalized
    }

    #[inline(always)]
    pub const fn labels(&self) -> Labels {
        self.labels
    }

    #[inline(always)]
    pub const fn nikud(&self) -> LabelId {
        self.labels.nikud
    }

    #[inline(always)]
    pub const fn dagesh(&self) -> LabelId {
        self.labels.dagesh
    }

    #[inline(always)]
    pub const fn sin(&self) -> LabelId {
        self.labels.sin
    }
}

struct MarkCursor<'a> {
    marks: &'a [char],
    pos: usize,
}

impl<'a> MarkCursor<'a> {
    const fn new(marks: &'a [char]) -> Self {
        Self { marks, pos: 0 }
    }

    /// Consumes the next mark if it belongs to `cate`.
    fn take(&mut self, cate: Category) -> Option<LabelId> {
        let id = self
            .marks
            .get(self.pos)
            .and_then(|&c| Diacritic::from_char(c))
            .and_then(|mark| cate.takes(mark))?;
        self.pos += 1;
        Some(id)
    }
}

/// Eligibility of `raw` for each category of [`Category::ANNOTATION_ORDER`].
#[inline(always)]
const fn eligibility(raw: char) -> [bool; 3] {
    [letters::can_dagesh(raw), letters::can_sin(raw), letters::can_nikud(raw)]
}

/// Labels single letters from their trailing marks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterAnnotator {
    mark_order: MarkOrder,
}

impl LetterAnnotator {
    /// Creates an annotator with the canonical mark order.
    pub const fn new() -> Self {
        Self {
            mark_order: MarkOrder::Canonical,
        }
    }

    /// Sets the order in which marks are offered to the category slots.
    pub const fn mark_order(mut self, mark_order: MarkOrder) -> Self {
        self.mark_order = mark_order;
        self
    }

    /// Labels `raw` from the marks written after it.
    ///
    /// Returns the letter and the number of marks it consumed. At most one mark
    /// per category is consumed; the remaining ones are left to the caller.
    pub fn annotate(&self, raw: char, pending: &[char]) -> (Letter, usize) {
        let eligible = eligibility(raw);
        let marks = self.ordered(pending, eligible);

        let mut cursor = MarkCursor::new(&marks);
        let mut labels = Labels::IRRELEVANT;
        for (cate, eligible) in Category::ANNOTATION_ORDER.into_iter().zip(eligible) {
            if !eligible {
                continue;
            }
            let id = cursor.take(cate).unwrap_or_else(|| cate.without());
            labels.set(cate, id);
        }

        // A lone dot in vav is the vowel shuruk, not a dagesh.
        if raw == VAV && labels.dagesh == DAGESH_ID && labels.nikud == Category::Nikud.without() {
            labels.dagesh = Category::Dagesh.without();
            labels.nikud = SHURUK_ID;
        }

        let letter = Letter {
            raw,
            normalized: letters::normalize(raw),
            labels,
        };
        (letter, cursor.pos)
    }

    fn ordered<'a>(&self, pending: &'a [char], eligible: [bool; 3]) -> Cow<'a, [char]> {
        if self.mark_order == MarkOrder::AsWritten || pending.len() < 2 {
            return Cow::Borrowed(pending);
        }
        let rank = |c: &char| {
            let mark = Diacritic::from_char(*c);
            Category::ANNOTATION_ORDER
                .into_iter()
                .zip(eligible)
                .position(|(cate, ok)| ok && mark.is_some_and(|m| cate.takes(m).is_some()))
                .unwrap_or(Category::ANNOTATION_ORDER.len())
        };
        let mut marks = pending.to_vec();
        marks.sort_by_key(rank);
        Cow::Owned(marks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::diacritics::{char_of, label_id};

    const DAGESH: char = '\u{05BC}';
    const KAMATZ: char = '\u{05B8}';
    const PATAKH: char = '\u{05B7}';
    const HOLAM: char = '\u{05B9}';
    const RAFE: char = '\u{05BF}';
    const SHIN_DOT: char = '\u{05C1}';
    const SIN_DOT: char = '\u{05C2}';
    const METEG: char = '\u{05BD}';

    #[test]
    fn test_special_ids() {
        assert_eq!(Category::Dagesh.position(Diacritic::DageshOrShuruk), Some(DAGESH_ID));
        assert_eq!(Category::Nikud.position(Diacritic::DageshOrShuruk), Some(SHURUK_ID));
    }

    #[test]
    fn test_bet_dagesh_kamatz_either_order() {
        let annotator = LetterAnnotator::new();
        for marks in [[DAGESH, KAMATZ], [KAMATZ, DAGESH]] {
            let (letter, consumed) = annotator.annotate('ב', &marks);
            assert_eq!(consumed, 2);
            assert_eq!(letter.dagesh(), DAGESH_ID);
            assert_eq!(letter.nikud(), label_id(Category::Nikud, KAMATZ));
            assert_eq!(letter.sin(), LabelId::IRRELEVANT);
            assert_eq!(letter.normalized(), 'ב');
        }
    }

    #[test]
    fn test_as_written_order() {
        let annotator = LetterAnnotator::new().mark_order(MarkOrder::AsWritten);
        let (letter, consumed) = annotator.annotate('ב', &[KAMATZ, DAGESH]);
        assert_eq!(consumed, 1);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(letter.nikud(), label_id(Category::Nikud, KAMATZ));

        let (letter, consumed) = annotator.annotate('ב', &[DAGESH, KAMATZ]);
        assert_eq!(consumed, 2);
        assert_eq!(letter.dagesh(), DAGESH_ID);
    }

    #[test]
    fn test_bare_letter() {
        let (letter, consumed) = LetterAnnotator::new().annotate('ש', &[]);
        assert_eq!(consumed, 0);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(letter.sin(), Category::Sin.without());
        assert_eq!(letter.nikud(), Category::Nikud.without());
    }

    #[test]
    fn test_shin() {
        let annotator = LetterAnnotator::new();
        let (letter, consumed) = annotator.annotate('ש', &[SHIN_DOT, KAMATZ]);
        assert_eq!(consumed, 2);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(char_of(Category::Sin, letter.sin()), Some(SHIN_DOT));
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(KAMATZ));

        let (letter, consumed) = annotator.annotate('ש', &[SIN_DOT, DAGESH, PATAKH]);
        assert_eq!(consumed, 3);
        assert_eq!(letter.dagesh(), DAGESH_ID);
        assert_eq!(char_of(Category::Sin, letter.sin()), Some(SIN_DOT));
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(PATAKH));
    }

    #[test]
    fn test_rafe_skips_dagesh_slot() {
        let annotator = LetterAnnotator::new();
        let (letter, consumed) = annotator.annotate('ב', &[RAFE]);
        assert_eq!(consumed, 1);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(letter.nikud(), label_id(Category::Nikud, RAFE));
        assert_eq!(letter.labels().to_array(), [16, 2, -1]);

        let (letter, consumed) = annotator.annotate('ש', &[RAFE, KAMATZ]);
        assert_eq!(consumed, 2);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(letter.sin(), label_id(Category::Sin, RAFE));
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(KAMATZ));

        // Vowel first: canonical order still lets the sin slot take the rafe.
        let (letter, _) = annotator.annotate('ש', &[KAMATZ, RAFE]);
        assert_eq!(letter.sin(), label_id(Category::Sin, RAFE));
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(KAMATZ));

        let (letter, _) = annotator.annotate('א', &[KAMATZ, RAFE]);
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(KAMATZ));
        assert_eq!(letter.dagesh(), LabelId::IRRELEVANT);
    }

    #[test]
    fn test_vav_shuruk() {
        let (letter, consumed) = LetterAnnotator::new().annotate('ו', &[DAGESH]);
        assert_eq!(consumed, 1);
        assert_eq!(letter.nikud(), SHURUK_ID);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(letter.sin(), LabelId::IRRELEVANT);
        assert_eq!(letter.labels().to_array(), [13, 2, -1]);
    }

    #[test]
    fn test_vav_with_dagesh_and_vowel() {
        let (letter, _) = LetterAnnotator::new().annotate('ו', &[DAGESH, KAMATZ]);
        assert_eq!(letter.dagesh(), DAGESH_ID);
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(KAMATZ));

        let (letter, _) = LetterAnnotator::new().annotate('ו', &[HOLAM]);
        assert_eq!(letter.dagesh(), Category::Dagesh.without());
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(HOLAM));
    }

    #[test]
    fn test_excess_marks_left_unconsumed() {
        let (letter, consumed) = LetterAnnotator::new().annotate('ב', &[DAGESH, KAMATZ, METEG]);
        assert_eq!(consumed, 2);
        assert_eq!(char_of(Category::Nikud, letter.nikud()), Some(KAMATZ));
    }

    #[test]
    fn test_ineligible_letters() {
        let (letter, consumed) = LetterAnnotator::new().annotate('ם', &[KAMATZ]);
        assert_eq!(consumed, 0);
        assert_eq!(letter.labels(), Labels::IRRELEVANT);
        assert_eq!(letter.normalized(), 'מ');

        let (letter, _) = LetterAnnotator::new().annotate('7', &[]);
        assert_eq!(letter.labels(), Labels::IRRELEVANT);
        assert_eq!(letter.raw(), '7');
        assert_eq!(letter.normalized(), '5');
    }

    #[test]
    fn test_labels_array() {
        let labels = Labels::from([8, 1, -1]);
        assert_eq!(labels.to_array(), [8, 1, -1]);
        assert_eq!(labels.get(Category::Dagesh), DAGESH_ID);
    }
}
