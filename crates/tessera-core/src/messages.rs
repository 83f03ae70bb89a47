//! Host link messages and the transport boundary.

use heapless::String;

use crate::{
    error::{FailureCode, RecoveryError},
    recovery::{RecoveryParams, SessionState},
};

/// Longest word acknowledgement kept. Letter mode only reads the first byte.
pub const WORD_ACK_BYTES: usize = 16;

/// Messages received from the host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HostMessage {
    RecoveryDevice(RecoveryParams),
    WordAck { word: String<WORD_ACK_BYTES> },
    Cancel,
    Initialize,
    DebugLinkGetState,
}

impl HostMessage {
    /// Builds a word acknowledgement, truncating overlong input.
    pub fn word_ack(word: &str) -> Self {
        Self::WordAck {
            word: crate::recovery::truncated(word),
        }
    }
}

/// Messages sent to the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeviceMessage<'a> {
    WordRequest,
    Success {
        message: &'a str,
    },
    Failure {
        kind: RecoveryError,
        code: FailureCode,
        message: &'a str,
    },
    DebugLinkState {
        state: SessionState,
        word_pos: u32,
        remaining_letters: u32,
    },
}

impl DeviceMessage<'_> {
    pub const fn failure(kind: RecoveryError) -> Self {
        Self::Failure {
            kind,
            code: kind.failure_code(),
            message: kind.message(),
        }
    }
}

/// Polled request/response link to the host.
pub trait Transport {
    type Error;

    fn poll_message(&mut self) -> Result<Option<HostMessage>, Self::Error>;
    fn send(&mut self, message: DeviceMessage<'_>) -> Result<(), Self::Error>;
}
