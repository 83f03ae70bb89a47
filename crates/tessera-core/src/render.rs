//! Device view models.

/// Rows visible in the word confirmation list.
pub const CHOICE_ROWS: usize = 4;

/// What the letter dialog asks for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LetterPrompt {
    /// Real request. Both indices are 1-based.
    Position { word: u8, letter: u8 },
    /// Decoy request for a literal letter, or an empty word when `None`.
    Literal(Option<char>),
}

/// Share of letter positions already requested.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Progress {
    pub done: u16,
    pub total: u16,
}

impl Progress {
    /// Filled width out of `full` pixels.
    pub fn fill(&self, full: u32) -> u32 {
        if self.total == 0 {
            return full;
        }
        u32::from(self.done.min(self.total)) * full / u32::from(self.total)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    Home {
        label: &'a str,
        initialized: bool,
    },
    LetterRequest {
        prompt: LetterPrompt,
        progress: Progress,
    },
    /// Word confirmation. `word` is 0-based.
    ChooseWord {
        word: usize,
        choices: &'a [&'a str],
        highlighted: usize,
    },
    /// Wordlist browsing. `word` and `index` are 0-based.
    ScrollWord {
        word: usize,
        word_total: usize,
        candidate: &'a str,
        index: usize,
    },
}

/// One visible row of the confirmation list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChoiceRow<'a> {
    pub word: &'a str,
    pub highlighted: bool,
}

/// Visible rows for `choices`. Short lists are shown whole with the
/// highlighted entry marked; longer lists scroll so the highlighted entry is
/// the top row, wrapping at the end.
pub fn choice_rows<'a>(
    choices: &'a [&'a str],
    highlighted: usize,
) -> impl Iterator<Item = ChoiceRow<'a>> + 'a {
    let len = choices.len();
    let scrolled = len > CHOICE_ROWS;
    (0..len.min(CHOICE_ROWS)).map(move |row| {
        if scrolled {
            ChoiceRow {
                word: choices[(highlighted + row) % len],
                highlighted: row == 0,
            }
        } else {
            ChoiceRow {
                word: choices[row],
                highlighted: row == highlighted,
            }
        }
    })
}

/// English ordinal suffix for a 1-based position.
pub const fn ordinal_suffix(n: usize) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
