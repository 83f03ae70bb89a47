//! Input abstraction layer.

pub mod mock;

/// Physical buttons on the device.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    /// Left button: cycle or scroll.
    Next,
    /// Right button: confirm.
    Confirm,
}

/// Debounced button edges and hold reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Down(Button),
    /// Still pressed; `polls` counts poll iterations since the press edge.
    Held { button: Button, polls: u16 },
    Up(Button),
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
