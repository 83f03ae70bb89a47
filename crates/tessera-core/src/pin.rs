//! PIN entry boundary.

/// Interactive PIN change run before a protected recovery starts.
pub trait PinProtection {
    type Error;

    /// Returns an error when the user cancels or the entries do not match.
    fn change_pin(&mut self) -> Result<(), Self::Error>;
}

/// Accepts every change without user interaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl PinProtection for NoPin {
    type Error = core::convert::Infallible;

    fn change_pin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
