//! Manual wordlist browsing with hold-to-accelerate.

/// Movement applied for one poll iteration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScrollStep {
    pub stride: u16,
    pub delay_ms: u16,
}

/// Acceleration table keyed by how many polls the button has been held.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScrollConfig {
    slow_until: u16,
    medium_until: u16,
    fast_until: u16,
    double_from: u16,
    quadruple_after: u16,
    slow_delay_ms: u16,
    medium_delay_ms: u16,
    fast_delay_ms: u16,
    fastest_delay_ms: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            slow_until: 5,
            medium_until: 15,
            fast_until: 30,
            double_from: 60,
            quadruple_after: 90,
            slow_delay_ms: 300,
            medium_delay_ms: 150,
            fast_delay_ms: 80,
            fastest_delay_ms: 40,
        }
    }
}

impl ScrollConfig {
    pub const fn with_delays_ms(mut self, slow: u16, medium: u16, fast: u16, fastest: u16) -> Self {
        self.slow_delay_ms = slow;
        self.medium_delay_ms = medium;
        self.fast_delay_ms = fast;
        self.fastest_delay_ms = fastest;
        self
    }

    pub const fn with_stride_thresholds(mut self, double_from: u16, quadruple_after: u16) -> Self {
        self.double_from = double_from;
        self.quadruple_after = quadruple_after;
        self
    }

    pub fn step_for(&self, held_polls: u16) -> ScrollStep {
        let delay_ms = if held_polls < self.slow_until {
            self.slow_delay_ms
        } else if held_polls < self.medium_until {
            self.medium_delay_ms
        } else if held_polls < self.fast_until {
            self.fast_delay_ms
        } else {
            self.fastest_delay_ms
        };

        let stride = if held_polls > self.quadruple_after {
            4
        } else if held_polls >= self.double_from {
            2
        } else {
            1
        };

        ScrollStep { stride, delay_ms }
    }
}

/// Cursor into the wordlist for the word currently being chosen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScrollSelector {
    cursor: u16,
    len: u16,
    last_step: Option<ScrollStep>,
}

impl ScrollSelector {
    pub fn new(len: usize) -> Self {
        Self {
            cursor: 0,
            len: len.min(u16::MAX as usize) as u16,
            last_step: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor as usize
    }

    pub fn last_step(&self) -> Option<ScrollStep> {
        self.last_step
    }

    /// Moves forward according to the hold duration, wrapping at the end.
    pub fn advance(&mut self, held_polls: u16, config: &ScrollConfig) -> ScrollStep {
        let step = config.step_for(held_polls);
        if self.len > 0 {
            let next = (self.cursor as u32 + step.stride as u32) % self.len as u32;
            self.cursor = next as u16;
        }
        self.last_step = Some(step);
        step
    }

    /// Back to the first entry for the next word position.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.last_step = None;
    }
}
