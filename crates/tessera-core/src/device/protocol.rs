impl<'w, TR, IN, ST, PN, RN> RecoveryDevice<'w, TR, IN, ST, PN, RN>
where
    TR: Transport,
    IN: InputProvider,
    ST: DeviceStorage,
    PN: PinProtection,
    RN: RngCore,
{
    fn process_messages(&mut self) {
        loop {
            match self.transport.poll_message() {
                Ok(Some(message)) => self.handle_message(message),
                Ok(None) => break,
                Err(_) => {
                    warn!("recovery: transport poll failed");
                    break;
                }
            }
        }
    }

    fn handle_message(&mut self, message: HostMessage) {
        match message {
            HostMessage::RecoveryDevice(params) => {
                let _ = self.recovery_init(&params);
            }
            HostMessage::WordAck { word } => self.recovery_word(word.as_str()),
            HostMessage::Cancel => self.host_abort(false),
            HostMessage::Initialize => self.host_abort(true),
            HostMessage::DebugLinkGetState => {
                let state = self.state();
                let word_pos = self.recovery_get_word_pos();
                let remaining_letters = self
                    .session
                    .as_ref()
                    .map_or(0, RecoverySession::remaining_letters);
                self.send(DeviceMessage::DebugLinkState {
                    state,
                    word_pos,
                    remaining_letters: remaining_letters as u32,
                });
            }
        }
    }

    /// Cancel and Initialize end an active session and wipe storage. Nothing
    /// is sent back.
    fn host_abort(&mut self, initialize: bool) {
        if self.session.take().is_none() {
            return;
        }

        self.wipe_storage();
        if initialize {
            self.aborted_by_initialize = true;
        }
        self.pending_redraw = true;
        info!(
            "recovery: interrupted by host {}",
            if initialize { "initialize" } else { "cancel" }
        );
    }
}
