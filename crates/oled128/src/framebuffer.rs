//! In-memory framebuffer in controller page order.

use crate::protocol::{BUFFER_SIZE, HEIGHT, WIDTH};

/// 1bpp framebuffer for the panel.
///
/// Byte `(y / 8) * WIDTH + x` holds the eight pixels of column `x` in page
/// `y / 8`; bit 0 is the topmost row of the page.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
    if x >= WIDTH || y >= HEIGHT {
        return None;
    }
    Some(((y / 8) * WIDTH + x, 1u8 << (y % 8)))
}

impl FrameBuffer {
    /// Creates a dark framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// Clears to dark (`on = false`) or lit (`on = true`).
    pub fn clear(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let Some((index, mask)) = locate(x, y) else {
            return false;
        };

        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let (index, mask) = locate(x, y)?;
        Some((self.bytes[index] & mask) != 0)
    }

    /// Flips every pixel in the inclusive rectangle `(x0, y0)..=(x1, y1)`,
    /// clipped to the panel.
    pub fn invert_region(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        if x0 > x1 || y0 > y1 || x0 >= WIDTH || y0 >= HEIGHT {
            return;
        }
        let x1 = x1.min(WIDTH - 1);
        let y1 = y1.min(HEIGHT - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Some((index, mask)) = locate(x, y) {
                    self.bytes[index] ^= mask;
                }
            }
        }
    }

    /// Fills the inclusive rectangle with `on`, clipped to the panel.
    pub fn fill_region(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, on: bool) {
        if x0 > x1 || y0 > y1 {
            return;
        }
        for y in y0..=y1.min(HEIGHT.saturating_sub(1)) {
            for x in x0..=x1.min(WIDTH.saturating_sub(1)) {
                let _ = self.set_pixel(x, y, on);
            }
        }
    }

    /// One page (eight rows) of column bytes.
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let start = page.checked_mul(WIDTH)?;
        self.bytes.get(start..start + WIDTH)
    }
}
