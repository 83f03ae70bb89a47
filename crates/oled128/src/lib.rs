#![cfg_attr(not(test), no_std)]

//! 128x64 monochrome OLED (SSD1306-class, 4-wire SPI) driver primitives.

mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::FrameBuffer;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Expected SPI clock in Hz (documented for board glue).
    pub spi_hz: u32,
    /// Contrast written during initialization.
    pub contrast: u8,
    /// Low time of the reset pulse.
    pub reset_pulse_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 8_000_000,
            contrast: 0xCF,
            reset_pulse_us: 10,
        }
    }
}

impl Config {
    pub const fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }

    pub const fn with_spi_hz(mut self, spi_hz: u32) -> Self {
        self.spi_hz = spi_hz;
        self
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// Data/command select pin operation failed.
    Dc(DcErr),
    /// Reset pin operation failed.
    Reset(RstErr),
}

pub type DriverResult<SpiErr, DcErr, RstErr> = Result<(), Error<SpiErr, DcErr, RstErr>>;

/// OLED driver over an SPI device plus DC and RST lines.
#[derive(Debug)]
pub struct Oled<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    config: Config,
}

impl<SPI, DC, RST> Oled<SPI, DC, RST>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST, config: Config) -> Self {
        Self {
            spi,
            dc,
            rst,
            config,
        }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }

    /// Pulses the reset line low.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.rst.set_high().map_err(Error::Reset)?;
        delay.delay_us(self.config.reset_pulse_us);
        self.rst.set_low().map_err(Error::Reset)?;
        delay.delay_us(self.config.reset_pulse_us);
        self.rst.set_high().map_err(Error::Reset)
    }

    /// Sends the power-up sequence and turns the panel on.
    pub fn initialize(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.command(&protocol::init_sequence(self.config.contrast))?;
        self.command(&[protocol::DISPLAY_ON])
    }

    pub fn set_display_on(&mut self, on: bool) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.command(&[if on {
            protocol::DISPLAY_ON
        } else {
            protocol::DISPLAY_OFF
        }])
    }

    pub fn set_contrast(&mut self, level: u8) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.config.contrast = level;
        self.command(&protocol::contrast_command(level))
    }

    /// Hardware inversion of the whole panel.
    pub fn set_inverted(&mut self, inverted: bool) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.command(&[if inverted {
            protocol::INVERT_DISPLAY
        } else {
            protocol::NORMAL_DISPLAY
        }])
    }

    /// Writes a full framebuffer starting at the top-left corner.
    pub fn flush(&mut self, frame: &FrameBuffer) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.command(&protocol::window_commands())?;
        self.dc.set_high().map_err(Error::Dc)?;
        self.spi.write(frame.bytes()).map_err(Error::Spi)
    }

    fn command(&mut self, bytes: &[u8]) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(bytes).map_err(Error::Spi)
    }
}
