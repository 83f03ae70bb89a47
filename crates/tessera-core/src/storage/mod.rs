//! Persistent device record abstraction.

pub mod memory;

use heapless::String;

use crate::{
    mnemonic::MnemonicBuffer,
    recovery::{LABEL_BYTES, LANGUAGE_BYTES},
};

/// Device fields that survive reboot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceRecord {
    pub label: String<LABEL_BYTES>,
    pub language: String<LANGUAGE_BYTES>,
    /// `None` until a recovery or setup chooses a value.
    pub passphrase_protection: Option<bool>,
    pub has_mnemonic: bool,
    pub mnemonic: MnemonicBuffer,
}

impl DeviceRecord {
    pub const fn new() -> Self {
        Self {
            label: String::new(),
            language: String::new(),
            passphrase_protection: None,
            has_mnemonic: false,
            mnemonic: MnemonicBuffer::new(),
        }
    }

    /// Forgets every field, wiping the mnemonic bytes.
    pub fn clear(&mut self) {
        self.label.clear();
        self.language.clear();
        self.passphrase_protection = None;
        self.has_mnemonic = false;
        self.mnemonic.clear();
    }
}

/// Staged writes plus an explicit commit.
///
/// Setters only touch the staged record; `commit` makes it durable and
/// `discard` reverts the staged record to the durable one. `reset` wipes
/// both staged and durable state.
pub trait DeviceStorage {
    type Error;

    fn record(&self) -> &DeviceRecord;
    fn set_label(&mut self, label: &str) -> Result<(), Self::Error>;
    fn set_language(&mut self, language: &str) -> Result<(), Self::Error>;
    fn set_passphrase_protection(&mut self, enabled: bool) -> Result<(), Self::Error>;
    /// Stores the phrase and sets `has_mnemonic`.
    fn set_mnemonic(&mut self, mnemonic: &MnemonicBuffer) -> Result<(), Self::Error>;
    fn commit(&mut self) -> Result<(), Self::Error>;
    fn discard(&mut self);
    fn reset(&mut self) -> Result<(), Self::Error>;
}
