//! Recovery dialogs for the 128x64 panel.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;
use oled128::{
    FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};
use tessera_core::render::{LetterPrompt, Progress, Screen, choice_rows, ordinal_suffix};

use super::FrameRenderer;

const LINE_BUF: usize = 32;
const CENTER_X: i32 = (WIDTH / 2) as i32;

const LINE_1_Y: i32 = 4;
const LINE_2_Y: i32 = 18;
const LINE_3_Y: i32 = 32;

pub(crate) const BAR_X: usize = 2;
pub(crate) const BAR_Y: usize = 50;
pub(crate) const BAR_W: usize = WIDTH - 2 * BAR_X;
pub(crate) const BAR_H: usize = 10;
const BAR_INSET: usize = 2;

pub(crate) const ROWS_TOP: usize = 14;
pub(crate) const ROW_H: usize = 12;
const ROW_TEXT_X: i32 = 6;

/// Draws `Screen` view models as text dialogs, a progress bar and an
/// inverted-row choice list.
#[derive(Debug, Clone, Copy)]
pub struct DialogRenderer {
    title: &'static str,
}

impl DialogRenderer {
    pub const fn new(title: &'static str) -> Self {
        Self { title }
    }
}

impl FrameRenderer for DialogRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer) {
        frame.clear(false);

        match screen {
            Screen::Home { label, initialized } => {
                draw_centered(frame, self.title, 12, &FONT_10X20);
                let label = if label.is_empty() { "(no label)" } else { label };
                draw_centered(frame, label, 36, &FONT_6X10);
                let status = if initialized {
                    "Ready"
                } else {
                    "Not initialized"
                };
                draw_centered(frame, status, 50, &FONT_6X10);
            }
            Screen::LetterRequest { prompt, progress } => {
                draw_centered(frame, "Please enter", LINE_1_Y, &FONT_6X10);

                // Decoy and real prompts share one three-line layout.
                let mut line: String<LINE_BUF> = String::new();
                let _ = match prompt {
                    LetterPrompt::Position { word, letter } => {
                        write!(line, "word {word}, letter {letter}")
                    }
                    LetterPrompt::Literal(Some(letter)) => write!(line, "the letter '{letter}'"),
                    LetterPrompt::Literal(None) => write!(line, "an empty word"),
                };
                draw_centered(frame, &line, LINE_2_Y, &FONT_6X10);
                draw_centered(frame, "of your mnemonic", LINE_3_Y, &FONT_6X10);

                draw_progress(frame, progress);
            }
            Screen::ChooseWord {
                word,
                choices,
                highlighted,
            } => {
                let mut title: String<LINE_BUF> = String::new();
                let ordinal = word + 1;
                let _ = write!(title, "Choose {ordinal}{} word", ordinal_suffix(ordinal));
                draw_centered(frame, &title, 1, &FONT_6X10);

                for (row, entry) in choice_rows(choices, highlighted).enumerate() {
                    let top = ROWS_TOP + row * ROW_H;
                    draw_text(frame, entry.word, ROW_TEXT_X, top as i32 + 1, &FONT_6X10);
                    if entry.highlighted {
                        frame.invert_region(0, top, WIDTH - 1, top + ROW_H - 1);
                    }
                }
            }
            Screen::ScrollWord {
                word,
                word_total,
                candidate,
                index,
            } => {
                let mut header: String<LINE_BUF> = String::new();
                let _ = write!(header, "Word {} of {}", word + 1, word_total);
                draw_centered(frame, &header, 1, &FONT_6X10);

                draw_centered(frame, candidate, 22, &FONT_10X20);

                let mut footer: String<LINE_BUF> = String::new();
                let _ = write!(footer, "#{}", index + 1);
                draw_centered(frame, &footer, HEIGHT as i32 - 11, &FONT_6X10);
            }
        }
    }
}

fn draw_progress(frame: &mut FrameBuffer, progress: Progress) {
    draw_frame(frame, BAR_X, BAR_Y, BAR_W, BAR_H);

    let inner_w = BAR_W - 2 * BAR_INSET;
    let fill = progress.fill(inner_w as u32) as usize;
    if fill > 0 {
        frame.fill_region(
            BAR_X + BAR_INSET,
            BAR_Y + BAR_INSET,
            BAR_X + BAR_INSET + fill - 1,
            BAR_Y + BAR_H - BAR_INSET - 1,
            true,
        );
    }
}

fn draw_frame(frame: &mut FrameBuffer, x: usize, y: usize, w: usize, h: usize) {
    let _ = Rectangle::new(Point::new(x as i32, y as i32), Size::new(w as u32, h as u32))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(frame);
}

fn draw_centered(frame: &mut FrameBuffer, text: &str, top: i32, font: &MonoFont<'static>) {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let layout = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build();
    let _ = Text::with_text_style(text, Point::new(CENTER_X, top), style, layout).draw(frame);
}

fn draw_text(frame: &mut FrameBuffer, text: &str, x: i32, top: i32, font: &MonoFont<'static>) {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let _ = Text::with_baseline(text, Point::new(x, top), style, Baseline::Top).draw(frame);
}
