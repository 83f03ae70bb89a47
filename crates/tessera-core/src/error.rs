//! Recovery failure kinds and their wire mapping.

use core::fmt;

/// Failure kinds surfaced to the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecoveryError {
    /// Word count is not 12, 18 or 24. No state is created.
    InvalidWordCount,
    /// PIN change during init did not complete.
    ActionCancelled,
    /// A real letter contradicts every wordlist entry. Fatal; storage is wiped.
    NoMatchingWord,
    /// Operation arrived while no session could accept it.
    UnexpectedMessage,
    /// The reconstructed phrase fails its wordlist checksum.
    InvalidMnemonic,
    /// The storage boundary rejected a write or commit.
    Storage,
}

/// Failure code carried on the wire next to the message text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureCode {
    UnexpectedMessage,
    SyntaxError,
    DataError,
    ActionCancelled,
    ProcessError,
}

impl RecoveryError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidWordCount => "Invalid word count (has to be 12, 18 or 24)",
            Self::ActionCancelled => "PIN change failed",
            Self::NoMatchingWord => "Wrong letter",
            Self::UnexpectedMessage => "Not in Recovery mode",
            Self::InvalidMnemonic => "Invalid mnemonic, are words in correct order?",
            Self::Storage => "Storage failure",
        }
    }

    pub const fn failure_code(self) -> FailureCode {
        match self {
            Self::InvalidWordCount | Self::NoMatchingWord => FailureCode::SyntaxError,
            Self::ActionCancelled => FailureCode::ActionCancelled,
            Self::UnexpectedMessage => FailureCode::UnexpectedMessage,
            Self::InvalidMnemonic => FailureCode::DataError,
            Self::Storage => FailureCode::ProcessError,
        }
    }

    /// Whether this failure wipes storage before returning to idle.
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::NoMatchingWord | Self::InvalidMnemonic | Self::Storage
        )
    }
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl core::error::Error for RecoveryError {}
