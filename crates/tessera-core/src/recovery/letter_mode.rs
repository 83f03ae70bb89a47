impl<'w> RecoverySession<'w> {
    /// Consumes the host's answer to the pending letter request.
    ///
    /// Only the first byte is used, lowercased; an empty answer reveals the
    /// end of a short word.
    pub fn accept_word<R: RngCore + ?Sized>(
        &mut self,
        answer: &str,
        rng: &mut R,
    ) -> Result<WordOutcome, RecoveryError> {
        let Stage::AwaitingLetter(request) = self.stage else {
            return Ok(WordOutcome::Ignored);
        };

        let position = match request {
            LetterRequest::Decoy { .. } => {
                debug!("recovery: decoy answered");
                return Ok(self.request_real_letter(rng));
            }
            LetterRequest::Real(position) => position,
        };

        let letter = answer
            .as_bytes()
            .first()
            .map(u8::to_ascii_lowercase)
            .unwrap_or(0);
        self.letters.reveal(position, letter);

        let word = position.word();
        match Disambiguator::new(self.wordlist).narrow(&self.letters.pattern(word)) {
            Narrowing::Exhausted => {
                info!("recovery: word {} has no candidates", word + 1);
                self.abort();
                return Err(RecoveryError::NoMatchingWord);
            }
            Narrowing::Narrowed(count) => {
                let retired = self.letters.retire_word(word);
                debug!(
                    "recovery: word {} narrowed to {} candidates, {} positions retired",
                    word + 1,
                    count,
                    retired
                );
            }
            Narrowing::Open => {}
        }

        if self.config.decoys && self.roll_decoy(rng) {
            let letter = self.fake_letter(rng);
            self.stage = Stage::AwaitingLetter(LetterRequest::Decoy { letter });
            return Ok(WordOutcome::NextRequest);
        }

        Ok(self.request_real_letter(rng))
    }

    /// Claims a random unasked position, or moves on to word confirmation
    /// once every position is settled.
    fn request_real_letter<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> WordOutcome {
        let remaining = self.letters.remaining();
        let claimed = if remaining == 0 {
            None
        } else {
            self.letters
                .claim_nth_unasked(uniform_usize(rng, remaining))
        };

        match claimed {
            Some(position) => {
                self.stage = Stage::AwaitingLetter(LetterRequest::Real(position));
                debug!(
                    "recovery: letter requested, {} positions left",
                    self.letters.remaining()
                );
                WordOutcome::NextRequest
            }
            None => {
                self.enter_choosing();
                WordOutcome::Choosing
            }
        }
    }

    /// Decoys fire with probability 2 / word_count after a real answer.
    fn roll_decoy<R: RngCore + ?Sized>(&self, rng: &mut R) -> bool {
        uniform(rng, (self.length.words() / 2) as u32) == 0
    }

    fn fake_letter<R: RngCore + ?Sized>(&self, rng: &mut R) -> Option<u8> {
        let word = self
            .wordlist
            .get(uniform_usize(rng, self.wordlist.len()))
            .unwrap_or("");
        let index = uniform_usize(rng, LETTERS_PER_WORD);
        word.as_bytes().get(index).copied()
    }

    fn enter_choosing(&mut self) {
        let word = self.resolved.len();
        let candidates = Disambiguator::new(self.wordlist).candidates(&self.letters.pattern(word));
        debug!(
            "recovery: confirming word {} from {} candidates",
            word + 1,
            candidates.len()
        );
        self.stage = Stage::Choosing {
            candidates,
            highlighted: 0,
        };
    }

    fn apply_choice_input(&mut self, event: InputEvent) -> InputOutcome {
        let Stage::Choosing {
            candidates,
            highlighted,
        } = &mut self.stage
        else {
            return InputOutcome::Ignored;
        };

        match event {
            InputEvent::Down(Button::Next) => {
                if candidates.len() > 1 {
                    *highlighted = (*highlighted + 1) % candidates.len();
                }
                InputOutcome::Redraw
            }
            InputEvent::Up(Button::Confirm) => {
                let Some(word) = candidates.get(*highlighted) else {
                    return InputOutcome::Ignored;
                };
                let outcome = self.push_resolved(word);
                if outcome == InputOutcome::Committed {
                    self.enter_choosing();
                }
                outcome
            }
            _ => InputOutcome::Ignored,
        }
    }
}
