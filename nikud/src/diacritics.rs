//! Registry of the Hebrew diacritic marks and their label ids.
//!
//! Every registered mark belongs to one or more [`Category`]. Within a category
//! the marks are numbered densely from zero, followed by the `WITHOUT` id, so a
//! category with `n` marks has `n + 1` label ids. [`LabelId::IRRELEVANT`] sits
//! outside that range and marks positions where the category does not apply.
use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

/// Label of one category at one letter.
#[derive(
    Clone, Copy, Eq, PartialEq, Debug, Hash, PartialOrd, Ord,
    Archive, Serialize, Deserialize,
)]
#[rkyv(derive(Debug))]
#[repr(transparent)]
pub struct LabelId(pub i16);

impl LabelId {
    /// The category is inapplicable at this position.
    pub const IRRELEVANT: Self = Self(-1);

    /// Padding slot in model-facing sequences. Same value as [`Self::IRRELEVANT`].
    pub const PAD: Self = Self::IRRELEVANT;

    #[inline(always)]
    pub const fn get(self) -> i16 {
        self.0
    }

    #[inline(always)]
    pub const fn is_irrelevant(self) -> bool {
        self.0 == Self::IRRELEVANT.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered diacritic marks, in registry order.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Diacritic {
    Shva,
    ReducedSegol,
    ReducedPatakh,
    ReducedKamatz,
    Hirik,
    Tzeire,
    Segol,
    Patakh,
    Kamatz,
    KamatzKatan,
    Holam,
    HolamHaserVav,
    Kubutz,
    DageshOrShuruk,
    Meteg,
    Maqaf,
    Rafe,
    Paseq,
    ShinYemanit,
    ShinSmalit,
}

/// All registered marks.
pub const DIACRITICS: [Diacritic; 20] = [
    Diacritic::Shva,
    Diacritic::ReducedSegol,
    Diacritic::ReducedPatakh,
    Diacritic::ReducedKamatz,
    Diacritic::Hirik,
    Diacritic::Tzeire,
    Diacritic::Segol,
    Diacritic::Patakh,
    Diacritic::Kamatz,
    Diacritic::KamatzKatan,
    Diacritic::Holam,
    Diacritic::HolamHaserVav,
    Diacritic::Kubutz,
    Diacritic::DageshOrShuruk,
    Diacritic::Meteg,
    Diacritic::Maqaf,
    Diacritic::Rafe,
    Diacritic::Paseq,
    Diacritic::ShinYemanit,
    Diacritic::ShinSmalit,
];

const NIKUD_MARKS: [Diacritic; 18] = [
    Diacritic::Shva,
    Diacritic::ReducedSegol,
    Diacritic::ReducedPatakh,
    Diacritic::ReducedKamatz,
    Diacritic::Hirik,
    Diacritic::Tzeire,
    Diacritic::Segol,
    Diacritic::Patakh,
    Diacritic::Kamatz,
    Diacritic::KamatzKatan,
    Diacritic::Holam,
    Diacritic::HolamHaserVav,
    Diacritic::Kubutz,
    Diacritic::DageshOrShuruk,
    Diacritic::Meteg,
    Diacritic::Maqaf,
    Diacritic::Rafe,
    Diacritic::Paseq,
];

const DAGESH_MARKS: [Diacritic; 2] = [Diacritic::Rafe, Diacritic::DageshOrShuruk];

const SIN_MARKS: [Diacritic; 3] = [Diacritic::Rafe, Diacritic::ShinYemanit, Diacritic::ShinSmalit];

impl Diacritic {
    /// Gets the combining character of the mark.
    pub const fn as_char(self) -> char {
        match self {
            Self::Shva => '\u{05B0}',
            Self::ReducedSegol => '\u{05B1}',
            Self::ReducedPatakh => '\u{05B2}',
            Self::ReducedKamatz => '\u{05B3}',
            Self::Hirik => '\u{05B4}',
            Self::Tzeire => '\u{05B5}',
            Self::Segol => '\u{05B6}',
            Self::Patakh => '\u{05B7}',
            Self::Kamatz => '\u{05B8}',
            Self::KamatzKatan => '\u{05C7}',
            Self::Holam => '\u{05B9}',
            Self::HolamHaserVav => '\u{05BA}',
            Self::Kubutz => '\u{05BB}',
            Self::DageshOrShuruk => '\u{05BC}',
            Self::Meteg => '\u{05BD}',
            Self::Maqaf => '\u{05BE}',
            Self::Rafe => '\u{05BF}',
            Self::Paseq => '\u{05C0}',
            Self::ShinYemanit => '\u{05C1}',
            Self::ShinSmalit => '\u{05C2}',
        }
    }

    /// Looks up a registered mark by its character.
    pub const fn from_char(c: char) -> Option<Self> {
        let d = match c {
            '\u{05B0}' => Self::Shva,
            '\u{05B1}' => Self::ReducedSegol,
            '\u{05B2}' => Self::ReducedPatakh,
            '\u{05B3}' => Self::ReducedKamatz,
            '\u{05B4}' => Self::Hirik,
            '\u{05B5}' => Self::Tzeire,
            '\u{05B6}' => Self::Segol,
            '\u{05B7}' => Self::Patakh,
            '\u{05B8}' => Self::Kamatz,
            '\u{05C7}' => Self::KamatzKatan,
            '\u{05B9}' => Self::Holam,
            '\u{05BA}' => Self::HolamHaserVav,
            '\u{05BB}' => Self::Kubutz,
            '\u{05BC}' => Self::DageshOrShuruk,
            '\u{05BD}' => Self::Meteg,
            '\u{05BE}' => Self::Maqaf,
            '\u{05BF}' => Self::Rafe,
            '\u{05C0}' => Self::Paseq,
            '\u{05C1}' => Self::ShinYemanit,
            '\u{05C2}' => Self::ShinSmalit,
            _ => return None,
        };
        Some(d)
    }

    /// Canonical name of the mark.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shva => "SHVA",
            Self::ReducedSegol => "REDUCED_SEGOL",
            Self::ReducedPatakh => "REDUCED_PATAKH",
            Self::ReducedKamatz => "REDUCED_KAMATZ",
            Self::Hirik => "HIRIK",
            Self::Tzeire => "TZEIRE",
            Self::Segol => "SEGOL",
            Self::Patakh => "PATAKH",
            Self::Kamatz => "KAMATZ",
            Self::KamatzKatan => "KAMATZ_KATAN",
            Self::Holam => "HOLAM",
            Self::HolamHaserVav => "HOLAM_HASER_VAV",
            Self::Kubutz => "KUBUTZ",
            Self::DageshOrShuruk => "DAGESH_OR_SHURUK",
            Self::Meteg => "METEG",
            Self::Maqaf => "MAQAF",
            Self::Rafe => "RAFE",
            Self::Paseq => "PASEQ",
            Self::ShinYemanit => "SHIN_YEMANIT",
            Self::ShinSmalit => "SHIN_SMALIT",
        }
    }

    /// Hebrew name of the mark, for human-readable reports.
    pub const fn hebrew_name(self) -> &'static str {
        match self {
            Self::Shva => "שוא",
            Self::ReducedSegol => "חטף-סגול",
            Self::ReducedPatakh => "חטף-פתח",
            Self::ReducedKamatz => "חטף-קמץ",
            Self::Hirik => "חיריק",
            Self::Tzeire => "צירה",
            Self::Segol => "סגול",
            Self::Patakh => "פתח",
            Self::Kamatz => "קמץ",
            Self::KamatzKatan => "קמץ-קטן",
            Self::Holam => "חולם",
            Self::HolamHaserVav => "חולם-חסר",
            Self::Kubutz => "קובוץ",
            Self::DageshOrShuruk => "דגש\\שורוק",
            Self::Meteg => "מתג",
            Self::Maqaf => "מקף",
            Self::Rafe => "רפה",
            Self::Paseq => "פסק",
            Self::ShinYemanit => "שין-ימנית",
            Self::ShinSmalit => "שין-שמאלית",
        }
    }
}

impl fmt::Display for Diacritic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic category of a diacritic label.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Category {
    /// Vowel points.
    Nikud,
    /// Gemination dot (or its explicit absence, rafe).
    Dagesh,
    /// Shin/sin dots on the letter shin.
    Sin,
}

impl Category {
    /// Order in which label triples are laid out and marks are re-emitted.
    pub const ALL: [Self; 3] = [Self::Nikud, Self::Dagesh, Self::Sin];

    /// Order in which a letter's pending marks are assigned to categories.
    ///
    /// The order decides how an ambiguous run of marks (e.g. a rafe) is
    /// partitioned and must not change.
    pub const ANNOTATION_ORDER: [Self; 3] = [Self::Dagesh, Self::Sin, Self::Nikud];

    /// Gets the marks of this category, indexed by label id.
    pub const fn marks(self) -> &'static [Diacritic] {
        match self {
            Self::Nikud => &NIKUD_MARKS,
            Self::Dagesh => &DAGESH_MARKS,
            Self::Sin => &SIN_MARKS,
        }
    }

    /// Number of label ids, including `WITHOUT` but not `IRRELEVANT`.
    ///
    /// This is the width of the model output head for the category.
    pub const fn size(self) -> usize {
        self.marks().len() + 1
    }

    /// The id meaning "applicable, but no mark present". Always the last id.
    pub const fn without(self) -> LabelId {
        LabelId(self.marks().len() as i16)
    }

    /// Gets the label id of `mark` in this category, if it belongs to it.
    pub fn position(self, mark: Diacritic) -> Option<LabelId> {
        self.marks()
            .iter()
            .position(|&m| m == mark)
            .map(|i| LabelId(i as i16))
    }

    /// Gets the label id assigned when the slot of this category takes `mark`.
    ///
    /// Rafe has an id in the dagesh table, but the dagesh slot only takes the
    /// dagesh dot; a rafe goes to the sin or nikud slot instead.
    pub fn takes(self, mark: Diacritic) -> Option<LabelId> {
        match (self, mark) {
            (Self::Dagesh, Diacritic::Rafe) => None,
            _ => self.position(mark),
        }
    }

    /// Checks that `id` is a valid label of this category or [`LabelId::IRRELEVANT`].
    pub const fn accepts(self, id: LabelId) -> bool {
        id.0 >= LabelId::IRRELEVANT.0 && (id.0 as isize) < self.size() as isize
    }

    /// Lowercase name used in reports and label layouts.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nikud => "nikud",
            Self::Dagesh => "dagesh",
            Self::Sin => "sin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks if `c` is a registered diacritic mark.
#[inline(always)]
pub const fn is_diacritic(c: char) -> bool {
    Diacritic::from_char(c).is_some()
}

/// Checks if `text` carries at least one registered diacritic mark.
pub fn contains_diacritic(text: &str) -> bool {
    text.chars().any(is_diacritic)
}

/// Gets the first category, in annotation order, that a mark can fill.
pub fn category_of(c: char) -> Option<Category> {
    let mark = Diacritic::from_char(c)?;
    Category::ANNOTATION_ORDER
        .into_iter()
        .find(|cate| cate.position(mark).is_some())
}

/// Gets the label id of `c` in `cate`, or `WITHOUT` when `c` does not belong to it.
pub fn label_id(cate: Category, c: char) -> LabelId {
    Diacritic::from_char(c)
        .and_then(|mark| cate.position(mark))
        .unwrap_or_else(|| cate.without())
}

/// Gets the mark character of a label, or `None` for `WITHOUT`, `IRRELEVANT`
/// and ids out of range.
pub fn char_of(cate: Category, id: LabelId) -> Option<char> {
    usize::try_from(id.0)
        .ok()
        .and_then(|i| cate.marks().get(i))
        .map(|mark| mark.as_char())
}

/// Gets the number of label ids of `cate`.
#[inline(always)]
pub const fn category_size(cate: Category) -> usize {
    cate.size()
}

/// Gets a printable name of a label.
pub fn label_name(cate: Category, id: LabelId) -> &'static str {
    if id.is_irrelevant() {
        return "IRRELEVANT";
    }
    if id == cate.without() {
        return "WITHOUT";
    }
    usize::try_from(id.0)
        .ok()
        .and_then(|i| cate.marks().get(i))
        .map_or("UNKNOWN", |mark| mark.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_sizes() {
        assert_eq!(category_size(Category::Nikud), 19);
        assert_eq!(category_size(Category::Dagesh), 3);
        assert_eq!(category_size(Category::Sin), 4);
    }

    #[test]
    fn test_without_is_last() {
        for cate in Category::ALL {
            assert_eq!(cate.without().get() as usize, cate.size() - 1);
            assert_eq!(char_of(cate, cate.without()), None);
            assert_eq!(char_of(cate, LabelId::IRRELEVANT), None);
        }
    }

    #[test]
    fn test_registry_roundtrip() {
        for mark in DIACRITICS {
            assert_eq!(Diacritic::from_char(mark.as_char()), Some(mark));
        }
        assert_eq!(Diacritic::from_char('ב'), None);
        assert_eq!(Diacritic::from_char('\u{05C3}'), None);
    }

    #[test]
    fn test_nikud_excludes_shin_dots() {
        let nikud = Category::Nikud.marks();
        assert_eq!(nikud.len(), DIACRITICS.len() - 2);
        assert!(!nikud.contains(&Diacritic::ShinYemanit));
        assert!(!nikud.contains(&Diacritic::ShinSmalit));
        assert!(nikud.contains(&Diacritic::Rafe));
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of('\u{05BC}'), Some(Category::Dagesh));
        assert_eq!(category_of('\u{05BF}'), Some(Category::Dagesh));
        assert_eq!(category_of('\u{05C1}'), Some(Category::Sin));
        assert_eq!(category_of('\u{05B8}'), Some(Category::Nikud));
        assert_eq!(category_of('א'), None);
    }

    #[test]
    fn test_dagesh_slot_takes_only_the_dot() {
        assert_eq!(Category::Dagesh.takes(Diacritic::DageshOrShuruk), Some(LabelId(1)));
        assert_eq!(Category::Dagesh.takes(Diacritic::Rafe), None);
        assert_eq!(Category::Dagesh.position(Diacritic::Rafe), Some(LabelId(0)));
        assert_eq!(Category::Sin.takes(Diacritic::Rafe), Some(LabelId(0)));
        assert_eq!(Category::Nikud.takes(Diacritic::Rafe), Some(LabelId(16)));
    }

    #[test]
    fn test_label_id_and_char_of() {
        let kamatz = label_id(Category::Nikud, '\u{05B8}');
        assert_eq!(kamatz, LabelId(8));
        assert_eq!(char_of(Category::Nikud, kamatz), Some('\u{05B8}'));

        let dagesh = label_id(Category::Dagesh, '\u{05BC}');
        assert_eq!(dagesh, LabelId(1));
        assert_eq!(label_id(Category::Dagesh, '\u{05B8}'), Category::Dagesh.without());

        assert_eq!(label_id(Category::Sin, '\u{05C2}'), LabelId(2));
        assert_eq!(char_of(Category::Sin, LabelId(99)), None);
    }

    #[test]
    fn test_accepts() {
        assert!(Category::Dagesh.accepts(LabelId::IRRELEVANT));
        assert!(Category::Dagesh.accepts(LabelId(2)));
        assert!(!Category::Dagesh.accepts(LabelId(3)));
        assert!(!Category::Sin.accepts(LabelId(-2)));
    }

    #[test]
    fn test_label_name() {
        assert_eq!(label_name(Category::Nikud, LabelId(0)), "SHVA");
        assert_eq!(label_name(Category::Sin, LabelId(3)), "WITHOUT");
        assert_eq!(label_name(Category::Sin, LabelId::IRRELEVANT), "IRRELEVANT");
        assert_eq!(label_name(Category::Sin, LabelId(7)), "UNKNOWN");
    }

    #[test]
    fn test_contains_diacritic() {
        assert!(contains_diacritic("\u{5E9}\u{5C1}\u{5B8}\u{5DC}\u{5D5}\u{5B9}\u{5DD}"));
        assert!(!contains_diacritic("שלום"));
        assert!(!contains_diacritic(""));
    }
}
