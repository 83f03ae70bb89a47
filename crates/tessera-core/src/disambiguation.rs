//! Positional wildcard matching of revealed letters against the wordlist.

use heapless::Vec;
use log::warn;

use crate::{letters::LetterPattern, wordlist::Wordlist};

/// Largest candidate list shown for explicit confirmation.
pub const MAX_CHOICES: usize = 16;

/// Whether `word` agrees with every revealed cell of `pattern`.
///
/// A revealed `0` only matches when the word is shorter than that position.
pub fn matches_pattern(word: &str, pattern: &LetterPattern) -> bool {
    let bytes = word.as_bytes();
    pattern.iter().enumerate().all(|(index, cell)| match cell {
        None => true,
        Some(letter) => bytes.get(index).copied().unwrap_or(0) == *letter,
    })
}

/// Result of counting candidates for one word.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Narrowing {
    /// Nothing in the wordlist matches.
    Exhausted,
    /// At most `MAX_CHOICES` entries match.
    Narrowed(usize),
    /// More than `MAX_CHOICES` entries still match.
    Open,
}

/// Wordlist entries still consistent with one word's revealed letters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CandidateSet<'w> {
    words: Vec<&'w str, MAX_CHOICES>,
}

impl<'w> CandidateSet<'w> {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'w str> {
        self.words.get(index).copied()
    }

    pub fn as_slice(&self) -> &[&'w str] {
        &self.words
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Disambiguator<'w> {
    wordlist: Wordlist<'w>,
}

impl<'w> Disambiguator<'w> {
    pub const fn new(wordlist: Wordlist<'w>) -> Self {
        Self { wordlist }
    }

    /// Counts matches, stopping as soon as the count exceeds `MAX_CHOICES`.
    pub fn narrow(&self, pattern: &LetterPattern) -> Narrowing {
        let count = self
            .wordlist
            .iter()
            .filter(|word| matches_pattern(word, pattern))
            .take(MAX_CHOICES + 1)
            .count();

        match count {
            0 => Narrowing::Exhausted,
            n if n <= MAX_CHOICES => Narrowing::Narrowed(n),
            _ => Narrowing::Open,
        }
    }

    /// Collects matches in wordlist order, truncated to `MAX_CHOICES`.
    pub fn candidates(&self, pattern: &LetterPattern) -> CandidateSet<'w> {
        let mut set = CandidateSet::default();
        for word in self.wordlist.iter().filter(|word| matches_pattern(word, pattern)) {
            if set.words.push(word).is_err() {
                warn!(
                    "recovery: candidate list truncated at {} entries",
                    MAX_CHOICES
                );
                break;
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::LETTERS_PER_WORD;

    const FIXTURE: &[&str] = &["act", "acid", "actor", "bolt", "bone"];

    #[test]
    fn wildcards_match_everything() {
        let pattern = [None; LETTERS_PER_WORD];
        assert!(FIXTURE.iter().all(|word| matches_pattern(word, &pattern)));
    }

    #[test]
    fn revealed_letters_match_by_position() {
        let pattern = [Some(b'a'), None, Some(b't'), None];
        assert!(matches_pattern("act", &pattern));
        assert!(matches_pattern("actor", &pattern));
        assert!(!matches_pattern("acid", &pattern));
    }

    #[test]
    fn zero_marks_end_of_short_word() {
        let pattern = [None, None, None, Some(0)];
        assert!(matches_pattern("act", &pattern));
        assert!(!matches_pattern("actor", &pattern));
    }

    #[test]
    fn narrowing_reports_exhausted_and_counts() {
        let list = Wordlist::from_words(FIXTURE);
        let disambiguator = Disambiguator::new(list);

        assert_eq!(
            disambiguator.narrow(&[Some(b'z'), None, None, None]),
            Narrowing::Exhausted
        );
        assert_eq!(
            disambiguator.narrow(&[Some(b'b'), None, None, None]),
            Narrowing::Narrowed(2)
        );

        let set = disambiguator.candidates(&[Some(b'a'), Some(b'c'), None, None]);
        assert_eq!(set.as_slice(), &["act", "acid", "actor"]);
    }

    #[test]
    fn english_first_letter_leaves_list_open() {
        let disambiguator = Disambiguator::new(Wordlist::english());
        assert_eq!(
            disambiguator.narrow(&[Some(b'a'), None, None, None]),
            Narrowing::Open
        );
        assert_eq!(
            disambiguator.narrow(&[Some(b'z'), Some(b'o'), None, None]),
            Narrowing::Narrowed(2)
        );
    }

    #[test]
    fn english_four_letters_are_unique() {
        let disambiguator = Disambiguator::new(Wordlist::english());
        let set = disambiguator.candidates(&[Some(b'a'), Some(b'b'), Some(b'a'), Some(b'n')]);
        assert_eq!(set.as_slice(), &["abandon"]);
    }
}
