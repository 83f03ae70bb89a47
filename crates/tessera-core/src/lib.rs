#![cfg_attr(not(test), no_std)]

//! Mnemonic recovery core: wordlist matching, letter tracking, the recovery
//! session state machine and the device controller that drives it.

pub mod device;
pub mod disambiguation;
pub mod error;
pub mod input;
pub mod letters;
pub mod messages;
pub mod mnemonic;
pub mod pin;
pub mod random;
pub mod recovery;
pub mod render;
pub mod scroll;
pub mod storage;
pub mod wordlist;

pub use device::{RecoveryDevice, TickResult};
pub use error::{FailureCode, RecoveryError};
pub use recovery::{InputMode, MnemonicLength, RecoveryConfig, RecoveryParams, SessionState};
pub use wordlist::Wordlist;
