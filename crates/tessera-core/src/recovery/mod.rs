//! Recovery session state machine shared by letter and scroll input modes.

use heapless::{String, Vec};
use log::{debug, info};
use rand_core::RngCore;

use crate::{
    disambiguation::{CandidateSet, Disambiguator, Narrowing},
    error::RecoveryError,
    input::{Button, InputEvent},
    letters::{LetterPosition, LetterTracker},
    mnemonic::{MAX_WORDS, MnemonicBuffer},
    random::{uniform, uniform_usize},
    render::{LetterPrompt, Progress, Screen},
    scroll::{ScrollConfig, ScrollSelector, ScrollStep},
    wordlist::{LETTERS_PER_WORD, Wordlist},
};

pub use crate::mnemonic::MnemonicLength;

pub const LABEL_BYTES: usize = 32;
pub const LANGUAGE_BYTES: usize = 16;

/// How the user enters each word.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InputMode {
    /// Host types single letters at randomized positions.
    #[default]
    Letters,
    /// User browses the wordlist on the device buttons.
    Scroll,
}

/// Parameters carried by a recovery request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryParams {
    pub word_count: u32,
    pub passphrase_protection: bool,
    pub pin_protection: bool,
    pub language: String<LANGUAGE_BYTES>,
    pub label: String<LABEL_BYTES>,
    pub enforce_wordlist: bool,
    pub input_mode: InputMode,
}

impl RecoveryParams {
    pub fn new(word_count: u32) -> Self {
        Self {
            word_count,
            passphrase_protection: false,
            pin_protection: false,
            language: String::new(),
            label: String::new(),
            enforce_wordlist: true,
            input_mode: InputMode::Letters,
        }
    }

    pub fn with_passphrase_protection(mut self, enabled: bool) -> Self {
        self.passphrase_protection = enabled;
        self
    }

    pub fn with_pin_protection(mut self, enabled: bool) -> Self {
        self.pin_protection = enabled;
        self
    }

    /// Truncates at a character boundary when `language` is too long.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = truncated(language);
        self
    }

    /// Truncates at a character boundary when `label` is too long.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = truncated(label);
        self
    }

    pub fn with_enforce_wordlist(mut self, enabled: bool) -> Self {
        self.enforce_wordlist = enabled;
        self
    }

    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }
}

/// Copies `text`, stopping at the last character that fits.
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Externally visible protocol state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    AwaitingWord,
    AwaitingChoice,
    Finalizing,
    Aborted,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecoveryConfig {
    pub decoys: bool,
    pub scroll: ScrollConfig,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            decoys: true,
            scroll: ScrollConfig::default(),
        }
    }
}

impl RecoveryConfig {
    pub const fn with_decoys(mut self, enabled: bool) -> Self {
        self.decoys = enabled;
        self
    }

    pub const fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }
}

/// Letter the host is currently asked for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LetterRequest {
    Real(LetterPosition),
    /// Answer is discarded. `None` asks for an empty word.
    Decoy { letter: Option<u8> },
}

/// What the controller must do after a word acknowledgement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WordOutcome {
    /// The acknowledgement carried no meaning in the current stage.
    Ignored,
    /// A new letter request is pending; send a `WordRequest`.
    NextRequest,
    /// All letters collected; the user now confirms each word on the device.
    Choosing,
}

/// Effect of one button event on the session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputOutcome {
    Ignored,
    Redraw,
    Moved(ScrollStep),
    /// A word was appended to the resolved list.
    Committed,
    /// The last word was appended; the session awaits finalization.
    Complete,
}

#[derive(Clone, Debug)]
enum Stage<'w> {
    AwaitingLetter(LetterRequest),
    Scrolling,
    Choosing {
        candidates: CandidateSet<'w>,
        highlighted: usize,
    },
    Finalizing,
    Aborted,
}

/// One in-progress recovery. Dropping it forgets every letter and word.
pub struct RecoverySession<'w> {
    wordlist: Wordlist<'w>,
    config: RecoveryConfig,
    length: MnemonicLength,
    mode: InputMode,
    enforce_wordlist: bool,
    letters: LetterTracker,
    selector: ScrollSelector,
    stage: Stage<'w>,
    resolved: Vec<&'w str, MAX_WORDS>,
}

include!("letter_mode.rs");
include!("scroll_mode.rs");
include!("view.rs");

impl<'w> RecoverySession<'w> {
    /// Starts a session. In letter mode the first request is always real.
    pub fn start<R: RngCore + ?Sized>(
        wordlist: Wordlist<'w>,
        length: MnemonicLength,
        mode: InputMode,
        enforce_wordlist: bool,
        config: RecoveryConfig,
        rng: &mut R,
    ) -> Self {
        let mut session = Self {
            wordlist,
            config,
            length,
            mode,
            enforce_wordlist,
            letters: LetterTracker::new(length),
            selector: ScrollSelector::new(wordlist.len()),
            stage: Stage::Scrolling,
            resolved: Vec::new(),
        };

        if mode == InputMode::Letters {
            session.request_real_letter(rng);
        }
        info!(
            "recovery: session started words={} mode={:?}",
            length.words(),
            mode
        );
        session
    }

    pub fn length(&self) -> MnemonicLength {
        self.length
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        match self.stage {
            Stage::AwaitingLetter(_) | Stage::Scrolling => SessionState::AwaitingWord,
            Stage::Choosing { .. } => SessionState::AwaitingChoice,
            Stage::Finalizing => SessionState::Finalizing,
            Stage::Aborted => SessionState::Aborted,
        }
    }

    /// Zero-based index of the word being selected on the device, if any.
    pub fn word_pos(&self) -> Option<usize> {
        match self.stage {
            Stage::Scrolling | Stage::Choosing { .. } => Some(self.resolved.len()),
            _ => None,
        }
    }

    /// Letter positions still to be requested.
    pub fn remaining_letters(&self) -> usize {
        match self.mode {
            InputMode::Letters => self.letters.remaining(),
            InputMode::Scroll => 0,
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Pending letter request, when awaiting one.
    pub fn letter_request(&self) -> Option<LetterRequest> {
        match self.stage {
            Stage::AwaitingLetter(request) => Some(request),
            _ => None,
        }
    }

    pub fn letters(&self) -> &LetterTracker {
        &self.letters
    }

    /// Applies one button event.
    pub fn apply_input(&mut self, event: InputEvent) -> InputOutcome {
        match self.stage {
            Stage::Choosing { .. } => self.apply_choice_input(event),
            Stage::Scrolling => self.apply_scroll_input(event),
            _ => InputOutcome::Ignored,
        }
    }

    /// Joins the resolved words and validates them. Session state is wiped
    /// either way; on failure the session is also aborted.
    pub fn finalize(&mut self) -> Result<MnemonicBuffer, RecoveryError> {
        if !matches!(self.stage, Stage::Finalizing) || self.resolved.len() != self.length.words()
        {
            return Err(RecoveryError::UnexpectedMessage);
        }

        let mut mnemonic = MnemonicBuffer::new();
        for word in &self.resolved {
            if !mnemonic.push_word(word) {
                self.abort();
                return Err(RecoveryError::InvalidMnemonic);
            }
        }

        if self.enforce_wordlist {
            if let Some(language) = self.wordlist.checksum_language() {
                if bip39::Mnemonic::parse_in_normalized(language, mnemonic.as_str()).is_err() {
                    debug!("recovery: checksum rejected");
                    self.abort();
                    return Err(RecoveryError::InvalidMnemonic);
                }
            }
        }

        self.wipe();
        info!("recovery: phrase assembled words={}", mnemonic.word_count());
        Ok(mnemonic)
    }

    /// Drops every letter and word. The session becomes terminal.
    pub fn abort(&mut self) {
        self.wipe();
        self.stage = Stage::Aborted;
        debug!("recovery: session aborted");
    }

    fn wipe(&mut self) {
        self.letters.wipe();
        self.selector.reset();
        self.resolved.clear();
    }

    fn push_resolved(&mut self, word: &'w str) -> InputOutcome {
        if self.resolved.push(word).is_err() {
            return InputOutcome::Ignored;
        }
        debug!(
            "recovery: word {}/{} resolved",
            self.resolved.len(),
            self.length.words()
        );

        if self.resolved.len() >= self.length.words() {
            self.stage = Stage::Finalizing;
            InputOutcome::Complete
        } else {
            InputOutcome::Committed
        }
    }
}

#[cfg(test)]
mod tests;
