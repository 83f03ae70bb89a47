//! Device controller: owns the boundaries and the single optional recovery
//! session, and routes host messages and button events into it.

use log::{debug, info, warn};
use rand_core::RngCore;

use crate::{
    error::RecoveryError,
    input::{InputEvent, InputProvider},
    messages::{DeviceMessage, HostMessage, Transport},
    mnemonic::{MnemonicBuffer, MnemonicLength},
    pin::PinProtection,
    recovery::{
        InputMode, InputOutcome, RecoveryConfig, RecoveryParams, RecoverySession, SessionState,
        WordOutcome,
    },
    render::Screen,
    storage::DeviceStorage,
    wordlist::Wordlist,
};

const RECOVERED_MESSAGE: &str = "Device recovered";
/// Upper bound on button events handled in one `tick`.
const MAX_INPUT_EVENTS_PER_TICK: usize = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

pub struct RecoveryDevice<'w, TR, IN, ST, PN, RN>
where
    TR: Transport,
    IN: InputProvider,
    ST: DeviceStorage,
    PN: PinProtection,
    RN: RngCore,
{
    wordlist: Wordlist<'w>,
    config: RecoveryConfig,
    transport: TR,
    input: IN,
    storage: ST,
    pin: PN,
    rng: RN,
    session: Option<RecoverySession<'w>>,
    pending_redraw: bool,
    input_delay_ms: u16,
    aborted_by_initialize: bool,
}

include!("protocol.rs");
include!("buttons.rs");

impl<'w, TR, IN, ST, PN, RN> RecoveryDevice<'w, TR, IN, ST, PN, RN>
where
    TR: Transport,
    IN: InputProvider,
    ST: DeviceStorage,
    PN: PinProtection,
    RN: RngCore,
{
    pub fn new(
        wordlist: Wordlist<'w>,
        config: RecoveryConfig,
        transport: TR,
        input: IN,
        storage: ST,
        pin: PN,
        rng: RN,
    ) -> Self {
        Self {
            wordlist,
            config,
            transport,
            input,
            storage,
            pin,
            rng,
            session: None,
            pending_redraw: true,
            input_delay_ms: 0,
            aborted_by_initialize: false,
        }
    }

    /// Drains pending host messages, then pending button events.
    pub fn tick(&mut self) -> TickResult {
        self.input_delay_ms = 0;
        self.process_messages();
        self.process_inputs();

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        if let Some(screen) = self.session.as_ref().and_then(RecoverySession::screen) {
            f(screen);
            return;
        }

        let record = self.storage.record();
        f(Screen::Home {
            label: record.label.as_str(),
            initialized: record.has_mnemonic,
        });
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, RecoverySession::state)
    }

    /// Pacing delay the poll loop should apply before the next tick.
    pub fn input_delay_ms(&self) -> u16 {
        self.input_delay_ms
    }

    /// Set when a host `Initialize` interrupted an active recovery.
    pub fn aborted_by_initialize(&self) -> bool {
        self.aborted_by_initialize
    }

    pub fn clear_aborted_by_initialize(&mut self) {
        self.aborted_by_initialize = false;
    }

    pub fn storage(&self) -> &ST {
        &self.storage
    }

    pub fn transport(&self) -> &TR {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut TR {
        &mut self.transport
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    /// Validates parameters, runs the optional PIN change, stages device
    /// fields and starts a session.
    pub fn recovery_init(&mut self, params: &RecoveryParams) -> Result<(), RecoveryError> {
        if self.session.take().is_some() {
            info!("recovery: discarding active session for new request");
            self.storage.discard();
        }
        self.pending_redraw = true;

        let length = match MnemonicLength::try_from(params.word_count) {
            Ok(length) => length,
            Err(err) => {
                debug!("recovery: rejected word count {}", params.word_count);
                self.fail(err);
                return Err(err);
            }
        };

        if params.pin_protection && self.pin.change_pin().is_err() {
            self.fail(RecoveryError::ActionCancelled);
            return Err(RecoveryError::ActionCancelled);
        }

        if let Err(err) = self.stage_device_fields(params) {
            self.fail(err);
            return Err(err);
        }

        let session = RecoverySession::start(
            self.wordlist,
            length,
            params.input_mode,
            params.enforce_wordlist,
            self.config,
            &mut self.rng,
        );
        self.session = Some(session);
        self.send(DeviceMessage::WordRequest);
        Ok(())
    }

    /// Feeds one word acknowledgement into the active session.
    pub fn recovery_word(&mut self, word: &str) {
        let Some(session) = self.session.as_mut() else {
            self.fail(RecoveryError::UnexpectedMessage);
            return;
        };

        match session.accept_word(word, &mut self.rng) {
            Ok(WordOutcome::Ignored) => {
                debug!("recovery: word ack ignored in {:?}", session.state());
            }
            Ok(WordOutcome::NextRequest) => {
                self.pending_redraw = true;
                self.send(DeviceMessage::WordRequest);
            }
            Ok(WordOutcome::Choosing) => {
                self.pending_redraw = true;
            }
            Err(err) => {
                self.session = None;
                self.fail(err);
            }
        }
    }

    /// Drops the session and the device fields it staged. Committed storage
    /// is left as is.
    pub fn recovery_abort(&mut self) {
        if self.session.take().is_some() {
            self.storage.discard();
            info!("recovery: aborted");
            self.pending_redraw = true;
        }
    }

    /// Zero-based index of the word being selected on the device; 0 when no
    /// word is being selected.
    pub fn recovery_get_word_pos(&self) -> u32 {
        self.session
            .as_ref()
            .and_then(RecoverySession::word_pos)
            .unwrap_or(0) as u32
    }

    fn stage_device_fields(&mut self, params: &RecoveryParams) -> Result<(), RecoveryError> {
        self.storage
            .set_passphrase_protection(params.passphrase_protection)
            .and_then(|()| self.storage.set_language(params.language.as_str()))
            .and_then(|()| self.storage.set_label(params.label.as_str()))
            .map_err(|_| RecoveryError::Storage)
    }

    fn finalize(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let result = session.finalize();
        drop(session);
        self.pending_redraw = true;

        let outcome = result.and_then(|mnemonic| self.persist(&mnemonic));
        match outcome {
            Ok(()) => {
                info!("recovery: device recovered");
                self.send(DeviceMessage::Success {
                    message: RECOVERED_MESSAGE,
                });
            }
            Err(err) => self.fail(err),
        }
    }

    fn persist(&mut self, mnemonic: &MnemonicBuffer) -> Result<(), RecoveryError> {
        self.storage
            .set_mnemonic(mnemonic)
            .and_then(|()| self.storage.commit())
            .map_err(|_| RecoveryError::Storage)
    }

    /// Reports `err` to the host, wiping storage first for fatal failures.
    fn fail(&mut self, err: RecoveryError) {
        if err.is_fatal() {
            self.wipe_storage();
        }
        warn!("recovery: failed: {}", err);
        self.pending_redraw = true;
        self.send(DeviceMessage::failure(err));
    }

    fn wipe_storage(&mut self) {
        if self.storage.reset().is_err() {
            warn!("storage: reset failed");
        }
    }

    fn send(&mut self, message: DeviceMessage<'_>) {
        if self.transport.send(message).is_err() {
            warn!("recovery: transport send failed");
        }
    }
}
