impl<'w> RecoverySession<'w> {
    /// View model for the current stage. `None` once the session is over.
    pub fn screen(&self) -> Option<Screen<'_>> {
        match &self.stage {
            Stage::AwaitingLetter(request) => {
                let prompt = match *request {
                    LetterRequest::Real(position) => LetterPrompt::Position {
                        word: (position.word() + 1) as u8,
                        letter: (position.letter() + 1) as u8,
                    },
                    LetterRequest::Decoy { letter } => {
                        LetterPrompt::Literal(letter.map(char::from))
                    }
                };
                Some(Screen::LetterRequest {
                    prompt,
                    progress: self.progress(),
                })
            }
            Stage::Scrolling => Some(Screen::ScrollWord {
                word: self.resolved.len(),
                word_total: self.length.words(),
                candidate: self.scroll_candidate().unwrap_or(""),
                index: self.selector.cursor(),
            }),
            Stage::Choosing {
                candidates,
                highlighted,
            } => Some(Screen::ChooseWord {
                word: self.resolved.len(),
                choices: candidates.as_slice(),
                highlighted: *highlighted,
            }),
            Stage::Finalizing | Stage::Aborted => None,
        }
    }

    /// Requested share of all letter positions. Unchanged by decoys.
    pub fn progress(&self) -> Progress {
        let total = self.letters.total() as u16;
        Progress {
            done: total - self.letters.remaining() as u16,
            total,
        }
    }
}
