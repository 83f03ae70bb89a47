use embedded_hal::digital::InputPin;

use tessera_core::input::{Button, InputEvent, InputProvider};

#[derive(Debug, Clone, Copy)]
pub struct ButtonPadConfig {
    active_low: bool,
    debounce_polls: u8,
}

impl Default for ButtonPadConfig {
    fn default() -> Self {
        Self {
            active_low: true,
            debounce_polls: 3,
        }
    }
}

impl ButtonPadConfig {
    pub const fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    pub const fn with_debounce_polls(mut self, debounce_polls: u8) -> Self {
        self.debounce_polls = debounce_polls;
        self
    }
}

#[derive(Debug)]
pub enum ButtonPadError<NextErr, ConfirmErr> {
    Next(NextErr),
    Confirm(ConfirmErr),
}

type ButtonPadResult<NextErr, ConfirmErr, T> = Result<T, ButtonPadError<NextErr, ConfirmErr>>;

#[derive(Debug, Clone, Copy)]
struct Debounce {
    raw: bool,
    stable: bool,
    stable_count: u8,
    // `None` until a debounced press edge; a button held at boot never
    // reports holds.
    held_polls: Option<u16>,
}

impl Debounce {
    fn new(pressed: bool) -> Self {
        Self {
            raw: pressed,
            stable: pressed,
            stable_count: 0,
            held_polls: None,
        }
    }

    fn update(&mut self, button: Button, pressed: bool, threshold: u8) -> Option<InputEvent> {
        if pressed == self.raw {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.raw = pressed;
            self.stable_count = 0;
        }

        if self.stable_count >= threshold.max(1) && self.stable != self.raw {
            self.stable = self.raw;
            if self.stable {
                self.held_polls = Some(0);
                return Some(InputEvent::Down(button));
            }
            return self.held_polls.take().map(|_| InputEvent::Up(button));
        }

        let polls = self.held_polls.as_mut()?;
        *polls = polls.saturating_add(1);
        Some(InputEvent::Held {
            button,
            polls: *polls,
        })
    }
}

/// Two debounced push buttons: `Next` on the left, `Confirm` on the right.
#[derive(Debug)]
pub struct ButtonPad<NEXT, CONFIRM> {
    next: NEXT,
    confirm: CONFIRM,
    config: ButtonPadConfig,
    next_state: Debounce,
    confirm_state: Debounce,
    pending_event: Option<InputEvent>,
}

impl<NEXT, CONFIRM> ButtonPad<NEXT, CONFIRM>
where
    NEXT: InputPin,
    CONFIRM: InputPin,
{
    pub fn new(
        mut next: NEXT,
        mut confirm: CONFIRM,
        config: ButtonPadConfig,
    ) -> ButtonPadResult<NEXT::Error, CONFIRM::Error, Self> {
        let next_high = next.is_high().map_err(ButtonPadError::Next)?;
        let confirm_high = confirm.is_high().map_err(ButtonPadError::Confirm)?;

        Ok(Self {
            next,
            confirm,
            config,
            next_state: Debounce::new(pressed_from_level(next_high, config.active_low)),
            confirm_state: Debounce::new(pressed_from_level(confirm_high, config.active_low)),
            pending_event: None,
        })
    }

    pub fn release(self) -> (NEXT, CONFIRM) {
        (self.next, self.confirm)
    }

    fn poll_next(&mut self) -> ButtonPadResult<NEXT::Error, CONFIRM::Error, Option<InputEvent>> {
        let high = self.next.is_high().map_err(ButtonPadError::Next)?;
        let pressed = pressed_from_level(high, self.config.active_low);
        Ok(self
            .next_state
            .update(Button::Next, pressed, self.config.debounce_polls))
    }

    fn poll_confirm(
        &mut self,
    ) -> ButtonPadResult<NEXT::Error, CONFIRM::Error, Option<InputEvent>> {
        let high = self.confirm.is_high().map_err(ButtonPadError::Confirm)?;
        let pressed = pressed_from_level(high, self.config.active_low);
        Ok(self
            .confirm_state
            .update(Button::Confirm, pressed, self.config.debounce_polls))
    }
}

impl<NEXT, CONFIRM> InputProvider for ButtonPad<NEXT, CONFIRM>
where
    NEXT: InputPin,
    CONFIRM: InputPin,
{
    type Error = ButtonPadError<NEXT::Error, CONFIRM::Error>;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        if let Some(event) = self.pending_event.take() {
            return Ok(Some(event));
        }

        let next_event = self.poll_next()?;
        let confirm_event = self.poll_confirm()?;

        match (next_event, confirm_event) {
            (Some(next), Some(confirm)) => {
                self.pending_event = Some(confirm);
                Ok(Some(next))
            }
            (Some(next), None) => Ok(Some(next)),
            (None, Some(confirm)) => Ok(Some(confirm)),
            (None, None) => Ok(None),
        }
    }
}

#[inline]
fn pressed_from_level(high: bool, active_low: bool) -> bool {
    if active_low { !high } else { high }
}
