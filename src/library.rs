//! Word lists loaded from text files
//!
//! One entry per line, `ID - WORD - IMAGE_CODE`:
//!
//! ```text
//! 1 - MOSCOW - ru
//! 2 - NEW YORK - us
//! 3 - TYRANNOSAURUS - trex.jpg
//! ```
//!
//! The image code is optional and defaults to the ID. Bad lines are logged
//! and skipped; a file with no usable line is an error.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::LoadError;
use crate::sim::{ImageRef, WordEntry, WordSource};

/// Directory image paths are resolved against
pub const IMAGE_ROOT: &str = "data/images";

/// One parsed line of a word file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub id: u32,
    pub word: String,
    pub image_code: String,
    pub image_path: String,
}

/// All words of one category
#[derive(Debug, Clone)]
pub struct WordList {
    category: String,
    records: Vec<WordRecord>,
}

impl WordList {
    /// Parse a word file for `category`
    pub fn parse(category: &str, text: &str) -> Result<Self, LoadError> {
        let mut records = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(category, line) {
                Some(record) => records.push(record),
                None => log::warn!("{}: skipping line {}: {:?}", category, line_no + 1, line),
            }
        }

        if records.is_empty() {
            return Err(LoadError::EmptyWordList {
                category: category.to_string(),
            });
        }

        records.sort_by_key(|r| r.id);
        log::info!("Loaded {} words for category {}", records.len(), category);
        Ok(Self {
            category: category.to_string(),
            records,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_line(category: &str, line: &str) -> Option<WordRecord> {
    let mut parts = line.split(" - ").map(str::trim);
    let id: u32 = parts.next()?.parse().ok()?;
    let word = parts.next().filter(|w| !w.is_empty())?;
    let image_code = parts
        .next()
        .filter(|c| !c.is_empty())
        .map_or_else(|| id.to_string(), str::to_string);
    let image_path = image_path(category, &image_code);

    Some(WordRecord {
        id,
        word: word.to_string(),
        image_code,
        image_path,
    })
}

/// `data/images/{category}/{code}`, with `.png` added when the code has no extension
pub fn image_path(category: &str, image_code: &str) -> String {
    if image_code.contains('.') {
        format!("{IMAGE_ROOT}/{category}/{image_code}")
    } else {
        format!("{IMAGE_ROOT}/{category}/{image_code}.png")
    }
}

/// The host's word source: the selected category's list plus a seeded picker
#[derive(Debug, Clone)]
pub struct Library {
    current: Option<WordList>,
    rng: Pcg32,
}

impl Library {
    pub fn new(seed: u64) -> Self {
        Self {
            current: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Switch to a freshly loaded list. The engine notices the category change
    /// on its next tick.
    pub fn select(&mut self, list: WordList) {
        log::info!("Library switched to category {}", list.category());
        self.current = Some(list);
    }

    /// Forget the selected list
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// A category is selected and has words
    pub fn is_ready(&self) -> bool {
        self.current.as_ref().is_some_and(|l| !l.is_empty())
    }

    pub fn current(&self) -> Option<&WordList> {
        self.current.as_ref()
    }

    pub fn len(&self) -> usize {
        self.current.as_ref().map_or(0, WordList::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordSource for Library {
    fn next_word(&mut self) -> Option<WordEntry> {
        let list = self.current.as_ref()?;
        if list.is_empty() {
            return None;
        }
        let record = &list.records[self.rng.random_range(0..list.len())];
        Some(WordEntry {
            text: record.word.clone(),
            image: ImageRef(record.image_path.clone()),
        })
    }

    fn category(&self) -> Option<&str> {
        self.current.as_ref().map(WordList::category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPITALS: &str = "\
3 - PARIS - fr
1 - MOSCOW - ru

2 - NEW YORK - us
oops
4 -  - gb
5 - ROME
";

    #[test]
    fn test_parse_sorts_and_skips_bad_lines() {
        let list = WordList::parse("capitals", CAPITALS).unwrap();
        let words: Vec<_> = list.records().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, ["MOSCOW", "NEW YORK", "PARIS", "ROME"]);
    }

    #[test]
    fn test_parse_image_paths() {
        let list = WordList::parse("capitals", CAPITALS).unwrap();
        assert_eq!(list.records()[0].image_path, "data/images/capitals/ru.png");
        // Missing code falls back to the ID
        assert_eq!(list.records()[3].image_code, "5");
        assert_eq!(list.records()[3].image_path, "data/images/capitals/5.png");
    }

    #[test]
    fn test_image_code_with_extension_is_kept() {
        assert_eq!(image_path("dinosaurs", "trex.jpg"), "data/images/dinosaurs/trex.jpg");
    }

    #[test]
    fn test_parse_empty_is_error() {
        let err = WordList::parse("animals", "\n  \nnot a word line\n").unwrap_err();
        assert!(matches!(err, LoadError::EmptyWordList { category } if category == "animals"));
    }

    #[test]
    fn test_library_source() {
        let mut library = Library::new(9);
        assert!(!library.is_ready());
        assert_eq!(library.next_word(), None);
        assert_eq!(library.category(), None);

        library.select(WordList::parse("capitals", CAPITALS).unwrap());
        assert!(library.is_ready());
        assert_eq!(library.category(), Some("capitals"));
        for _ in 0..20 {
            let entry = library.next_word().unwrap();
            assert!(["MOSCOW", "NEW YORK", "PARIS", "ROME"].contains(&entry.text.as_str()));
            assert!(entry.image.as_str().starts_with("data/images/capitals/"));
        }

        library.clear();
        assert!(library.is_empty());
    }
}
