impl<'w> RecoverySession<'w> {
    /// Wordlist entry under the scroll cursor.
    pub fn scroll_candidate(&self) -> Option<&'w str> {
        self.wordlist.wrapping(self.selector.cursor())
    }

    pub fn scroll_cursor(&self) -> usize {
        self.selector.cursor()
    }

    fn apply_scroll_input(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::Down(Button::Next) => {
                InputOutcome::Moved(self.selector.advance(0, &self.config.scroll))
            }
            InputEvent::Held {
                button: Button::Next,
                polls,
            } => InputOutcome::Moved(self.selector.advance(polls, &self.config.scroll)),
            InputEvent::Up(Button::Confirm) => {
                let Some(word) = self.scroll_candidate() else {
                    return InputOutcome::Ignored;
                };
                self.selector.reset();
                self.push_resolved(word)
            }
            _ => InputOutcome::Ignored,
        }
    }
}
