//! Mnemonic length and the fixed-capacity phrase buffer.

use core::str;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::RecoveryError;

/// Longest phrase: 24 words of up to 8 bytes plus separators.
pub const MNEMONIC_BYTES: usize = 240;

/// Upper bound on words per phrase.
pub const MAX_WORDS: usize = 24;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MnemonicLength {
    Twelve,
    Eighteen,
    TwentyFour,
}

impl MnemonicLength {
    pub const fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::Eighteen => 18,
            Self::TwentyFour => 24,
        }
    }
}

impl TryFrom<u32> for MnemonicLength {
    type Error = RecoveryError;

    fn try_from(word_count: u32) -> Result<Self, Self::Error> {
        match word_count {
            12 => Ok(Self::Twelve),
            18 => Ok(Self::Eighteen),
            24 => Ok(Self::TwentyFour),
            _ => Err(RecoveryError::InvalidWordCount),
        }
    }
}

/// Space-separated phrase text. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MnemonicBuffer {
    bytes: [u8; MNEMONIC_BYTES],
    len: usize,
}

impl Default for MnemonicBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MnemonicBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MnemonicBuffer")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl PartialEq for MnemonicBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MnemonicBuffer {}

impl MnemonicBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; MNEMONIC_BYTES],
            len: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.bytes.zeroize();
        self.len = 0;
    }

    /// Replaces the contents. Returns `false` and leaves the buffer empty when
    /// `text` does not fit.
    pub fn set(&mut self, text: &str) -> bool {
        self.clear();
        if text.len() > MNEMONIC_BYTES {
            return false;
        }
        self.bytes[..text.len()].copy_from_slice(text.as_bytes());
        self.len = text.len();
        true
    }

    /// Appends `word`, inserting a single space separator after the first
    /// word. Returns `false` without modifying the buffer when it would
    /// overflow.
    pub fn push_word(&mut self, word: &str) -> bool {
        let separator = usize::from(self.len > 0);
        if self.len + separator + word.len() > MNEMONIC_BYTES {
            return false;
        }

        if separator == 1 {
            self.bytes[self.len] = b' ';
            self.len += 1;
        }
        self.bytes[self.len..self.len + word.len()].copy_from_slice(word.as_bytes());
        self.len += word.len();
        true
    }

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }

    pub fn word_count(&self) -> usize {
        self.as_str().split(' ').filter(|word| !word.is_empty()).count()
    }
}
