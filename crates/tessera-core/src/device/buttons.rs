impl<'w, TR, IN, ST, PN, RN> RecoveryDevice<'w, TR, IN, ST, PN, RN>
where
    TR: Transport,
    IN: InputProvider,
    ST: DeviceStorage,
    PN: PinProtection,
    RN: RngCore,
{
    /// Drains button events until one moves the scroll cursor or reports a
    /// hold sample. Either ends the tick so `input_delay_ms` paces the next
    /// step.
    fn process_inputs(&mut self) {
        for _ in 0..MAX_INPUT_EVENTS_PER_TICK {
            match self.input.poll_event() {
                Ok(Some(event)) => {
                    let moved = self.apply_input_event(event);
                    if moved || matches!(event, InputEvent::Held { .. }) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("buttons: input poll failed");
                    break;
                }
            }
        }
    }

    /// Returns true when the event moved the scroll cursor.
    fn apply_input_event(&mut self, event: InputEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match session.apply_input(event) {
            InputOutcome::Ignored => {}
            InputOutcome::Redraw => self.pending_redraw = true,
            InputOutcome::Moved(step) => {
                self.input_delay_ms = self.input_delay_ms.max(step.delay_ms);
                self.pending_redraw = true;
                return true;
            }
            InputOutcome::Committed => {
                let scroll = session.mode() == InputMode::Scroll;
                self.pending_redraw = true;
                if scroll {
                    self.send(DeviceMessage::WordRequest);
                }
            }
            InputOutcome::Complete => self.finalize(),
        }
        false
    }
}
