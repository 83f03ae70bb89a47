//! Command-level protocol helpers for 128x64 SSD1306-class controllers.

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Eight-row pages; each framebuffer byte is one vertical strip of a page.
pub const PAGES: usize = HEIGHT / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_CONTRAST: u8 = 0x81;
pub const RESUME_FROM_RAM: u8 = 0xA4;
pub const NORMAL_DISPLAY: u8 = 0xA6;
pub const INVERT_DISPLAY: u8 = 0xA7;
pub const COLUMN_ADDRESS: u8 = 0x21;
pub const PAGE_ADDRESS: u8 = 0x22;

const SET_CLOCK_DIV: u8 = 0xD5;
const SET_MULTIPLEX: u8 = 0xA8;
const SET_DISPLAY_OFFSET: u8 = 0xD3;
const SET_START_LINE: u8 = 0x40;
const CHARGE_PUMP: u8 = 0x8D;
const MEMORY_MODE: u8 = 0x20;
const SEGMENT_REMAP: u8 = 0xA1;
const COM_SCAN_DEC: u8 = 0xC8;
const SET_COM_PINS: u8 = 0xDA;
const SET_PRECHARGE: u8 = 0xD9;
const SET_VCOM_DETECT: u8 = 0xDB;

/// Length of the power-up command sequence.
pub const INIT_SEQUENCE_LEN: usize = 24;

/// Length of the full-screen addressing window command.
pub const WINDOW_COMMAND_LEN: usize = 6;

/// Builds the power-up sequence: internal charge pump, horizontal
/// addressing, rotated 180 degrees, display left off.
pub const fn init_sequence(contrast: u8) -> [u8; INIT_SEQUENCE_LEN] {
    [
        DISPLAY_OFF,
        SET_CLOCK_DIV,
        0x80,
        SET_MULTIPLEX,
        (HEIGHT - 1) as u8,
        SET_DISPLAY_OFFSET,
        0x00,
        SET_START_LINE,
        CHARGE_PUMP,
        0x14,
        MEMORY_MODE,
        0x00,
        SEGMENT_REMAP,
        COM_SCAN_DEC,
        SET_COM_PINS,
        0x12,
        SET_CONTRAST,
        contrast,
        SET_PRECHARGE,
        0xF1,
        SET_VCOM_DETECT,
        0x40,
        RESUME_FROM_RAM,
        NORMAL_DISPLAY,
    ]
}

/// Addresses the whole panel so a full buffer write lands at (0, 0).
pub const fn window_commands() -> [u8; WINDOW_COMMAND_LEN] {
    [
        COLUMN_ADDRESS,
        0,
        (WIDTH - 1) as u8,
        PAGE_ADDRESS,
        0,
        (PAGES - 1) as u8,
    ]
}

#[inline]
pub const fn contrast_command(level: u8) -> [u8; 2] {
    [SET_CONTRAST, level]
}
