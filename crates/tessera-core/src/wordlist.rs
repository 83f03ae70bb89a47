//! Read-only recovery wordlist.

use bip39::Language;

/// Number of entries in a production wordlist.
pub const WORDLIST_LEN: usize = 2048;

/// Number of leading letters tracked per word.
pub const LETTERS_PER_WORD: usize = 4;

/// Ordered, immutable table of recovery words.
#[derive(Clone, Copy, Debug)]
pub struct Wordlist<'w> {
    words: &'w [&'w str],
    language: Option<Language>,
}

impl Wordlist<'static> {
    /// BIP39 English list.
    pub fn english() -> Self {
        Self {
            words: Language::English.word_list(),
            language: Some(Language::English),
        }
    }
}

impl<'w> Wordlist<'w> {
    /// Wraps an arbitrary table. Used for fixtures and alternate lists without
    /// a BIP39 checksum definition.
    pub const fn from_words(words: &'w [&'w str]) -> Self {
        Self {
            words,
            language: None,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'w str> {
        self.words.get(index).copied()
    }

    /// Entry at `index` modulo the list length.
    pub fn wrapping(&self, index: usize) -> Option<&'w str> {
        if self.words.is_empty() {
            return None;
        }
        self.get(index % self.words.len())
    }

    pub fn position(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|entry| *entry == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'w str> + '_ {
        self.words.iter().copied()
    }

    /// BIP39 language whose checksum rules apply to phrases built from this
    /// list, if any.
    pub fn checksum_language(&self) -> Option<Language> {
        self.language
    }
}
