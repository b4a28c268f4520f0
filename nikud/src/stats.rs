//! Label distribution of a corpus.
use std::fmt;

use hashbrown::HashMap;

use crate::annotator::Letter;
use crate::corpus::Document;
use crate::diacritics::{label_name, Category, LabelId};

/// Occurrence counts of labels per category.
///
/// `IRRELEVANT` positions are not counted.
#[derive(Debug, Clone, Default)]
pub struct LabelHistogram {
    counts: HashMap<(Category, LabelId), u64>,
    num_letters: u64,
}

impl LabelHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the labels of one letter.
    pub fn add_letter(&mut self, letter: &Letter) {
        let labels = letter.labels();
        for cate in Category::ALL {
            let id = labels.get(cate);
            if !id.is_irrelevant() {
                *self.counts.entry((cate, id)).or_insert(0) += 1;
            }
        }
        self.num_letters += 1;
    }

    /// Counts the labels of every letter of `doc`.
    pub fn add_document(&mut self, doc: &Document) {
        for sentence in doc.sentences() {
            for letter in sentence.letters() {
                self.add_letter(letter);
            }
        }
    }

    #[inline(always)]
    pub fn count(&self, cate: Category, id: LabelId) -> u64 {
        self.counts.get(&(cate, id)).copied().unwrap_or(0)
    }

    /// Gets the number of letters for which `cate` applies.
    pub fn total(&self, cate: Category) -> u64 {
        self.counts
            .iter()
            .filter(|((c, _), _)| *c == cate)
            .map(|(_, n)| n)
            .sum()
    }

    #[inline(always)]
    pub const fn num_letters(&self) -> u64 {
        self.num_letters
    }

    /// Gets the count of every label id of `cate`, in id order.
    pub fn entries(&self, cate: Category) -> Vec<(LabelId, u64)> {
        (0..cate.size() as i16)
            .map(|i| (LabelId(i), self.count(cate, LabelId(i))))
            .collect()
    }
}

impl fmt::Display for LabelHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "letters\t{}", self.num_letters)?;
        for cate in Category::ALL {
            let total = self.total(cate);
            writeln!(f, "[{cate}]\t{total}")?;
            for (id, n) in self.entries(cate) {
                let hebrew = usize::try_from(id.get())
                    .ok()
                    .and_then(|i| cate.marks().get(i))
                    .map_or("", |m| m.hebrew_name());
                let ratio = if total == 0 { 0.0 } else { n as f64 / total as f64 };
                writeln!(
                    f,
                    "{id}\t{}\t{hebrew}\t{n}\t{:.4}",
                    label_name(cate, id),
                    ratio
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::corpus::parse;

    const DAGESH: char = '\u{05BC}';
    const KAMATZ: char = '\u{05B8}';
    const SHIN_DOT: char = '\u{05C1}';

    #[test]
    fn test_counts() {
        let text = format!("ב{DAGESH}{KAMATZ}ש{SHIN_DOT}{KAMATZ} א");
        let doc = parse(&text).unwrap();
        let mut hist = LabelHistogram::new();
        hist.add_document(&doc);

        assert_eq!(hist.num_letters(), 4);
        let kamatz = Category::Nikud.position(crate::diacritics::Diacritic::Kamatz).unwrap();
        assert_eq!(hist.count(Category::Nikud, kamatz), 2);
        assert_eq!(hist.count(Category::Nikud, Category::Nikud.without()), 1);
        assert_eq!(hist.total(Category::Nikud), 3);
        assert_eq!(hist.total(Category::Dagesh), 2);
        assert_eq!(hist.total(Category::Sin), 1);
        assert_eq!(hist.count(Category::Sin, LabelId::IRRELEVANT), 0);
    }

    #[test]
    fn test_entries_cover_all_ids() {
        let hist = LabelHistogram::new();
        for cate in Category::ALL {
            let entries = hist.entries(cate);
            assert_eq!(entries.len(), cate.size());
            assert!(entries.iter().all(|&(_, n)| n == 0));
        }
    }

    #[test]
    fn test_display() {
        let doc = parse(&format!("ב{KAMATZ}")).unwrap();
        let mut hist = LabelHistogram::new();
        hist.add_document(&doc);
        let report = hist.to_string();
        assert!(report.starts_with("letters\t1\n"));
        assert!(report.contains("KAMATZ\tקמץ\t1\t1.0000"));
        assert!(report.contains("[sin]\t0"));
    }
}
