//! Board adapters around a `RecoveryDevice`, ticked the way a board loop
//! runs them.

use core::{
    cell::{Cell, RefCell},
    convert::Infallible,
};
use std::collections::VecDeque;

use embedded_hal::{
    digital::{ErrorType, InputPin, OutputPin},
    spi::{ErrorType as SpiErrorType, Operation, SpiDevice},
};
use oled128::{Config, FrameBuffer, Oled};
use rand_core::RngCore;
use tessera_core::{
    InputMode, RecoveryConfig, RecoveryDevice, RecoveryParams, SessionState, TickResult, Wordlist,
    messages::{DeviceMessage, HostMessage, Transport},
    pin::NoPin,
    render::Screen,
    storage::memory::MemoryStorage,
};

use crate::{
    input::buttons::{ButtonPad, ButtonPadConfig},
    render::{FrameRenderer, dialog::DialogRenderer},
};

struct FakePin<'a>(&'a Cell<bool>);

impl ErrorType for FakePin<'_> {
    type Error = Infallible;
}

impl InputPin for FakePin<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// Panel bus that keeps the bytes written while DC is high.
#[derive(Default)]
struct PanelBus {
    dc_high: bool,
    data: Vec<u8>,
}

struct PanelSpi<'a>(&'a RefCell<PanelBus>);
struct PanelDc<'a>(&'a RefCell<PanelBus>);
struct PanelReset;

impl SpiErrorType for PanelSpi<'_> {
    type Error = Infallible;
}

impl SpiDevice<u8> for PanelSpi<'_> {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut bus = self.0.borrow_mut();
        for op in operations {
            if let Operation::Write(bytes) = op
                && bus.dc_high
            {
                bus.data.extend_from_slice(bytes);
            }
        }
        Ok(())
    }
}

impl ErrorType for PanelDc<'_> {
    type Error = Infallible;
}

impl OutputPin for PanelDc<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().dc_high = true;
        Ok(())
    }
}

impl ErrorType for PanelReset {
    type Error = Infallible;
}

impl OutputPin for PanelReset {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Default)]
struct HostLink {
    inbox: VecDeque<HostMessage>,
    word_requests: usize,
}

impl Transport for HostLink {
    type Error = Infallible;

    fn poll_message(&mut self) -> Result<Option<HostMessage>, Self::Error> {
        Ok(self.inbox.pop_front())
    }

    fn send(&mut self, message: DeviceMessage<'_>) -> Result<(), Self::Error> {
        if matches!(message, DeviceMessage::WordRequest) {
            self.word_requests += 1;
        }
        Ok(())
    }
}

struct CountingRng(u32);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(0x9E37_79B9);
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

type BoardDevice<'p> = RecoveryDevice<
    'static,
    HostLink,
    ButtonPad<FakePin<'p>, FakePin<'p>>,
    MemoryStorage,
    NoPin,
    CountingRng,
>;

fn board<'p>(next: &'p Cell<bool>, confirm: &'p Cell<bool>) -> BoardDevice<'p> {
    let pad = ButtonPad::new(
        FakePin(next),
        FakePin(confirm),
        ButtonPadConfig::default().with_debounce_polls(1),
    )
    .unwrap();
    RecoveryDevice::new(
        Wordlist::english(),
        RecoveryConfig::default(),
        HostLink::default(),
        pad,
        MemoryStorage::new(),
        NoPin,
        CountingRng(7),
    )
}

fn scroll_index(device: &BoardDevice<'_>) -> Option<usize> {
    let mut index = None;
    device.with_screen(|screen| {
        if let Screen::ScrollWord { index: at, .. } = screen {
            index = Some(at);
        }
    });
    index
}

#[test]
fn held_next_pin_scrolls_one_word_per_tick() {
    // Active low: high is released.
    let next = Cell::new(true);
    let confirm = Cell::new(true);
    let mut device = board(&next, &confirm);

    let params = RecoveryParams::new(12).with_input_mode(InputMode::Scroll);
    device
        .transport_mut()
        .inbox
        .push_back(HostMessage::RecoveryDevice(params));
    assert_eq!(device.tick(), TickResult::RenderRequested);
    assert_eq!(device.transport().word_requests, 1);
    assert_eq!(scroll_index(&device), Some(0));

    next.set(false);
    // First sample only starts the debounce window.
    assert_eq!(device.tick(), TickResult::NoRender);
    assert_eq!(device.tick(), TickResult::RenderRequested);
    assert_eq!(scroll_index(&device), Some(1));

    // Every later tick takes one hold sample, one word at a time.
    for expected in 2..=5 {
        assert_eq!(device.tick(), TickResult::RenderRequested);
        assert_eq!(scroll_index(&device), Some(expected));
        assert_eq!(device.input_delay_ms(), 300);
    }

    let bus = RefCell::new(PanelBus::default());
    let mut panel = Oled::new(PanelSpi(&bus), PanelDc(&bus), PanelReset, Config::default());
    panel.initialize().unwrap();
    let mut frame = FrameBuffer::new();
    let mut renderer = DialogRenderer::new("Tessera");
    device.with_screen(|screen| renderer.render(screen, &mut frame));
    panel.flush(&frame).unwrap();
    assert_eq!(bus.borrow().data.as_slice(), frame.bytes().as_slice());
    assert!(frame.bytes().iter().any(|byte| *byte != 0));

    device.transport_mut().inbox.push_back(HostMessage::Cancel);
    device.tick();
    assert_eq!(device.state(), SessionState::Idle);
}

#[test]
fn confirm_release_commits_word_picked_with_next() {
    let next = Cell::new(true);
    let confirm = Cell::new(true);
    let mut device = board(&next, &confirm);

    let params = RecoveryParams::new(12).with_input_mode(InputMode::Scroll);
    device
        .transport_mut()
        .inbox
        .push_back(HostMessage::RecoveryDevice(params));
    device.tick();

    // Tap next: debounce, press, hold sample while the release debounces,
    // release.
    next.set(false);
    device.tick();
    device.tick();
    next.set(true);
    device.tick();
    device.tick();
    assert_eq!(scroll_index(&device), Some(2));

    confirm.set(false);
    device.tick();
    device.tick();
    confirm.set(true);
    device.tick();
    device.tick();
    assert_eq!(device.transport().word_requests, 2);
    assert_eq!(device.recovery_get_word_pos(), 1);
    assert_eq!(scroll_index(&device), Some(0));
}
