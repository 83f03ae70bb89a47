//! Per-position letter bookkeeping for letter-disambiguation recovery.

use zeroize::Zeroize;

use crate::{
    mnemonic::{MAX_WORDS, MnemonicLength},
    wordlist::LETTERS_PER_WORD,
};

/// Total tracked positions for the longest phrase.
pub const MAX_POSITIONS: usize = MAX_WORDS * LETTERS_PER_WORD;

const MASK_WORDS: usize = MAX_POSITIONS.div_ceil(32);

/// Revealed letters of one word. `None` is a wildcard; `Some(0)` means the
/// word ends before that position.
pub type LetterPattern = [Option<u8>; LETTERS_PER_WORD];

/// One (word, letter) pair, stored as a flat index `word * 4 + letter`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LetterPosition(u8);

impl LetterPosition {
    pub const fn from_index(index: usize) -> Self {
        Self(index as u8)
    }

    pub const fn new(word: usize, letter: usize) -> Self {
        Self((word * LETTERS_PER_WORD + letter) as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based word index.
    pub const fn word(self) -> usize {
        self.index() / LETTERS_PER_WORD
    }

    /// Zero-based letter index within the word.
    pub const fn letter(self) -> usize {
        self.index() % LETTERS_PER_WORD
    }
}

/// Set-only bitset over `word_count * 4` positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AskedMask {
    bits: [u32; MASK_WORDS],
    len: u8,
    unset: u8,
}

impl AskedMask {
    pub fn new(len: usize) -> Self {
        let len = len.min(MAX_POSITIONS) as u8;
        Self {
            bits: [0; MASK_WORDS],
            len,
            unset: len,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn test(&self, index: usize) -> bool {
        index < self.len() && (self.bits[index / 32] & (1 << (index % 32))) != 0
    }

    /// Sets bit `index`. Returns `true` when the bit was previously unset.
    pub fn set(&mut self, index: usize) -> bool {
        if index >= self.len() || self.test(index) {
            return false;
        }
        self.bits[index / 32] |= 1 << (index % 32);
        self.unset -= 1;
        true
    }

    pub fn count_unset(&self) -> usize {
        self.unset as usize
    }

    /// Index of the `n`-th unset bit, counting from zero.
    pub fn nth_unset(&self, n: usize) -> Option<usize> {
        (0..self.len()).filter(|index| !self.test(*index)).nth(n)
    }
}

/// Letter grid plus the asked mask for one recovery session.
#[derive(Debug)]
pub struct LetterTracker {
    length: MnemonicLength,
    asked: AskedMask,
    grid: [LetterPattern; MAX_WORDS],
}

impl LetterTracker {
    pub fn new(length: MnemonicLength) -> Self {
        Self {
            length,
            asked: AskedMask::new(length.words() * LETTERS_PER_WORD),
            grid: [[None; LETTERS_PER_WORD]; MAX_WORDS],
        }
    }

    pub fn length(&self) -> MnemonicLength {
        self.length
    }

    /// Positions still to request.
    pub fn remaining(&self) -> usize {
        self.asked.count_unset()
    }

    pub fn total(&self) -> usize {
        self.asked.len()
    }

    pub fn asked(&self) -> &AskedMask {
        &self.asked
    }

    pub fn is_asked(&self, position: LetterPosition) -> bool {
        self.asked.test(position.index())
    }

    /// Marks the `n`-th still-unasked position as asked and returns it.
    pub fn claim_nth_unasked(&mut self, n: usize) -> Option<LetterPosition> {
        let index = self.asked.nth_unset(n)?;
        self.asked.set(index);
        Some(LetterPosition::from_index(index))
    }

    pub fn reveal(&mut self, position: LetterPosition, letter: u8) {
        if position.word() < self.length.words() {
            self.grid[position.word()][position.letter()] = Some(letter);
        }
    }

    pub fn pattern(&self, word: usize) -> LetterPattern {
        self.grid
            .get(word)
            .copied()
            .unwrap_or([None; LETTERS_PER_WORD])
    }

    /// Marks every remaining position of `word` as asked. Returns how many
    /// positions were newly marked.
    pub fn retire_word(&mut self, word: usize) -> usize {
        (0..LETTERS_PER_WORD)
            .filter(|letter| self.asked.set(LetterPosition::new(word, *letter).index()))
            .count()
    }

    /// Whether every position of `word` has been asked or retired.
    pub fn word_settled(&self, word: usize) -> bool {
        (0..LETTERS_PER_WORD).all(|letter| self.asked.test(LetterPosition::new(word, letter).index()))
    }

    /// Forgets every revealed letter.
    pub fn wipe(&mut self) {
        self.grid.zeroize();
        self.asked = AskedMask::new(self.asked.len());
    }
}

impl Drop for LetterTracker {
    fn drop(&mut self) {
        self.grid.zeroize();
    }
}
