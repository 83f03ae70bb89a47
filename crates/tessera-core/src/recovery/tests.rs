use super::*;
use crate::{
    letters::LetterPattern,
    random::test_rng::{ScriptedRng, XorShift},
};

const FIXTURE: &[&str] = &["acid", "bolt", "cyan", "drum"];

fn fixture_session(rng: &mut impl RngCore, decoys: bool) -> RecoverySession<'static> {
    RecoverySession::start(
        Wordlist::from_words(FIXTURE),
        MnemonicLength::Twelve,
        InputMode::Letters,
        false,
        RecoveryConfig::default().with_decoys(decoys),
        rng,
    )
}

fn answer_for(request: LetterRequest, phrase: &[&str]) -> &'static str {
    match request {
        LetterRequest::Real(position) => {
            let word = phrase[position.word()];
            match word.as_bytes().get(position.letter()) {
                Some(b'a') => "a",
                Some(b'b') => "b",
                Some(b'c') => "c",
                Some(b'd') => "d",
                Some(b'e') => "e",
                Some(b'i') => "i",
                Some(b'l') => "l",
                Some(b'm') => "m",
                Some(b'n') => "n",
                Some(b'o') => "o",
                Some(b'r') => "r",
                Some(b't') => "t",
                Some(b'u') => "u",
                Some(b'y') => "y",
                _ => "",
            }
        }
        LetterRequest::Decoy { .. } => "q",
    }
}

fn patterns(session: &RecoverySession<'_>) -> [LetterPattern; 12] {
    core::array::from_fn(|word| session.letters().pattern(word))
}

#[test]
fn first_request_is_real_and_claimed() {
    let mut rng = ScriptedRng::new(&[5]);
    let session = fixture_session(&mut rng, true);

    assert_eq!(session.state(), SessionState::AwaitingWord);
    assert_eq!(
        session.letter_request(),
        Some(LetterRequest::Real(LetterPosition::new(1, 1)))
    );
    assert_eq!(session.remaining_letters(), 47);
    assert_eq!(session.word_pos(), None);
}

#[test]
fn narrowed_word_retires_its_other_positions() {
    let mut rng = ScriptedRng::new(&[0, 3, 0]);
    let mut session = fixture_session(&mut rng, true);

    assert_eq!(session.accept_word("A", &mut rng), Ok(WordOutcome::NextRequest));
    assert_eq!(session.letters().pattern(0), [Some(b'a'), None, None, None]);
    assert!(session.letters().word_settled(0));
    // One claimed, three retired, one claimed for the next request.
    assert_eq!(session.remaining_letters(), 43);
    assert_eq!(
        session.letter_request(),
        Some(LetterRequest::Real(LetterPosition::new(1, 0)))
    );
}

#[test]
fn decoy_answer_leaves_letters_untouched() {
    // start: position 0; roll: decoy; fake word 1 letter 2; then real claim 0.
    let mut rng = ScriptedRng::new(&[0, 0, 1, 2, 0]);
    let mut session = fixture_session(&mut rng, true);

    assert_eq!(session.accept_word("a", &mut rng), Ok(WordOutcome::NextRequest));
    assert_eq!(
        session.letter_request(),
        Some(LetterRequest::Decoy { letter: Some(b'l') })
    );

    let before = patterns(&session);
    let remaining = session.remaining_letters();
    let progress = session.progress();

    assert_eq!(session.accept_word("z", &mut rng), Ok(WordOutcome::NextRequest));
    assert_eq!(patterns(&session), before);
    assert_eq!(session.remaining_letters(), remaining - 1);
    assert!(matches!(
        session.letter_request(),
        Some(LetterRequest::Real(_))
    ));
    assert_eq!(progress.done + 1, session.progress().done);
}

#[test]
fn decoys_never_follow_each_other() {
    let phrase = ["acid"; 12];
    let mut rng = ScriptedRng::new(&[0]);
    let mut session = fixture_session(&mut rng, true);

    let mut previous_was_decoy = false;
    let mut real_requests = 0;
    while let Some(request) = session.letter_request() {
        let is_decoy = matches!(request, LetterRequest::Decoy { .. });
        assert!(!(is_decoy && previous_was_decoy));
        if !is_decoy {
            real_requests += 1;
        }
        previous_was_decoy = is_decoy;
        session
            .accept_word(answer_for(request, &phrase), &mut rng)
            .unwrap();
    }

    // Every roll hit, so the last real letter was followed by a decoy.
    assert!(previous_was_decoy);
    assert_eq!(real_requests, 12);
    assert_eq!(session.state(), SessionState::AwaitingChoice);
}

#[test]
fn contradicting_letter_aborts_and_wipes() {
    let mut rng = ScriptedRng::new(&[0]);
    let mut session = fixture_session(&mut rng, false);

    assert_eq!(
        session.accept_word("z", &mut rng),
        Err(RecoveryError::NoMatchingWord)
    );
    assert_eq!(session.state(), SessionState::Aborted);
    assert_eq!(session.letters().pattern(0), [None; LETTERS_PER_WORD]);
    assert_eq!(session.letter_request(), None);
    assert_eq!(session.accept_word("a", &mut rng), Ok(WordOutcome::Ignored));
}

#[test]
fn asked_positions_are_monotonic() {
    let phrase = [
        "drum", "acid", "cyan", "bolt", "bolt", "acid", "drum", "cyan", "acid", "acid", "bolt",
        "drum",
    ];
    let mut rng = XorShift::new(0xdecaf);
    let mut session = fixture_session(&mut rng, true);

    let mut asked = *session.letters().asked();
    let mut remaining = session.remaining_letters();
    while let Some(request) = session.letter_request() {
        session
            .accept_word(answer_for(request, &phrase), &mut rng)
            .unwrap();

        let now = *session.letters().asked();
        for index in 0..now.len() {
            assert!(!asked.test(index) || now.test(index), "bit {index} cleared");
        }
        assert!(session.remaining_letters() <= remaining);
        asked = now;
        remaining = session.remaining_letters();
    }

    assert_eq!(session.remaining_letters(), 0);
    assert_eq!(session.state(), SessionState::AwaitingChoice);
}

#[test]
fn choosing_cycles_and_commits_each_word() {
    let list: &'static [&'static str] = &["acid", "acre", "bolt"];
    let mut rng = XorShift::new(42);
    let mut session = RecoverySession::start(
        Wordlist::from_words(list),
        MnemonicLength::Twelve,
        InputMode::Letters,
        false,
        RecoveryConfig::default().with_decoys(false),
        &mut rng,
    );

    let phrase = ["acre"; 12];
    while let Some(request) = session.letter_request() {
        session
            .accept_word(answer_for(request, &phrase), &mut rng)
            .unwrap();
    }
    assert_eq!(session.state(), SessionState::AwaitingChoice);
    assert_eq!(session.word_pos(), Some(0));

    // Each word offers either [acid, acre] or just [acre]; one Next press
    // lands on acre in both cases.
    for word in 0..12 {
        assert_eq!(
            session.apply_input(InputEvent::Down(Button::Next)),
            InputOutcome::Redraw
        );
        assert_eq!(
            session.apply_input(InputEvent::Held {
                button: Button::Next,
                polls: 3
            }),
            InputOutcome::Ignored
        );
        assert_eq!(
            session.apply_input(InputEvent::Down(Button::Confirm)),
            InputOutcome::Ignored
        );
        let outcome = session.apply_input(InputEvent::Up(Button::Confirm));
        if word < 11 {
            assert_eq!(outcome, InputOutcome::Committed);
            assert_eq!(session.word_pos(), Some(word + 1));
        } else {
            assert_eq!(outcome, InputOutcome::Complete);
        }
    }

    let mnemonic = session.finalize().unwrap();
    assert_eq!(mnemonic.word_count(), 12);
    assert!(mnemonic.as_str().split(' ').all(|word| word == "acre"));
}

#[test]
fn choice_screen_lists_candidates() {
    let list: &'static [&'static str] = &["acid", "acre", "bolt"];
    // Always claims the first unasked position, so only first letters are asked.
    let mut rng = ScriptedRng::new(&[0]);
    let mut session = RecoverySession::start(
        Wordlist::from_words(list),
        MnemonicLength::Twelve,
        InputMode::Letters,
        false,
        RecoveryConfig::default().with_decoys(false),
        &mut rng,
    );
    while session.letter_request().is_some() {
        session.accept_word("a", &mut rng).unwrap();
    }

    session.apply_input(InputEvent::Down(Button::Next));
    match session.screen() {
        Some(Screen::ChooseWord {
            word,
            choices,
            highlighted,
        }) => {
            assert_eq!(word, 0);
            assert_eq!(choices, &["acid", "acre"]);
            assert_eq!(highlighted, 1);
        }
        other => panic!("unexpected screen {other:?}"),
    }
}

#[test]
fn letter_screen_reports_one_based_position_and_progress() {
    let mut rng = ScriptedRng::new(&[25]);
    let session = fixture_session(&mut rng, false);

    assert_eq!(
        session.screen(),
        Some(Screen::LetterRequest {
            prompt: LetterPrompt::Position { word: 7, letter: 2 },
            progress: Progress { done: 1, total: 48 },
        })
    );
}

#[test]
fn empty_answer_reveals_word_end() {
    let list: &'static [&'static str] = &["act", "acid", "actor"];
    // Claim word 0 letter 3 first.
    let mut rng = ScriptedRng::new(&[3]);
    let mut session = RecoverySession::start(
        Wordlist::from_words(list),
        MnemonicLength::Twelve,
        InputMode::Letters,
        false,
        RecoveryConfig::default().with_decoys(false),
        &mut rng,
    );

    session.accept_word("", &mut rng).unwrap();
    assert_eq!(session.letters().pattern(0), [None, None, None, Some(0)]);
    assert!(session.letters().word_settled(0));
}

#[test]
fn scroll_edges_and_holds_move_the_cursor() {
    let mut rng = XorShift::new(1);
    let english = Wordlist::english();
    let mut session = RecoverySession::start(
        english,
        MnemonicLength::Twelve,
        InputMode::Scroll,
        true,
        RecoveryConfig::default(),
        &mut rng,
    );
    assert_eq!(session.word_pos(), Some(0));
    assert_eq!(session.remaining_letters(), 0);

    for _ in 0..5 {
        assert!(matches!(
            session.apply_input(InputEvent::Down(Button::Next)),
            InputOutcome::Moved(ScrollStep {
                stride: 1,
                delay_ms: 300
            })
        ));
    }
    assert_eq!(
        session.apply_input(InputEvent::Held {
            button: Button::Next,
            polls: 95
        }),
        InputOutcome::Moved(ScrollStep {
            stride: 4,
            delay_ms: 40
        })
    );
    assert_eq!(session.scroll_cursor(), 9);
    assert_eq!(session.scroll_candidate(), english.get(9));

    assert_eq!(
        session.apply_input(InputEvent::Up(Button::Confirm)),
        InputOutcome::Committed
    );
    assert_eq!(session.scroll_cursor(), 0);
    assert_eq!(session.word_pos(), Some(1));
    assert_eq!(session.resolved_count(), 1);
    assert_eq!(session.accept_word("abandon", &mut rng), Ok(WordOutcome::Ignored));
}

fn scroll_phrase(last_index: usize, enforce_wordlist: bool) -> Result<MnemonicBuffer, RecoveryError> {
    let mut rng = XorShift::new(3);
    let mut session = RecoverySession::start(
        Wordlist::english(),
        MnemonicLength::Twelve,
        InputMode::Scroll,
        enforce_wordlist,
        RecoveryConfig::default(),
        &mut rng,
    );

    for _ in 0..11 {
        assert_eq!(
            session.apply_input(InputEvent::Up(Button::Confirm)),
            InputOutcome::Committed
        );
    }
    for _ in 0..last_index {
        session.apply_input(InputEvent::Down(Button::Next));
    }
    assert_eq!(
        session.apply_input(InputEvent::Up(Button::Confirm)),
        InputOutcome::Complete
    );
    assert_eq!(session.state(), SessionState::Finalizing);
    session.finalize()
}

#[test]
fn checksum_valid_phrase_is_accepted() {
    let mnemonic = scroll_phrase(3, true).unwrap();
    assert_eq!(
        mnemonic.as_str(),
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon \
         abandon about"
    );
}

#[test]
fn checksum_failure_is_rejected_only_when_enforced() {
    assert_eq!(scroll_phrase(0, true), Err(RecoveryError::InvalidMnemonic));
    let mnemonic = scroll_phrase(0, false).unwrap();
    assert_eq!(mnemonic.word_count(), 12);
}

#[test]
fn finalize_before_completion_is_rejected() {
    let mut rng = ScriptedRng::new(&[0]);
    let mut session = fixture_session(&mut rng, false);
    assert_eq!(session.finalize(), Err(RecoveryError::UnexpectedMessage));
    assert_eq!(session.state(), SessionState::AwaitingWord);
}

#[test]
fn params_truncate_long_text() {
    let params = RecoveryParams::new(12)
        .with_label("a label that is far longer than thirty-two bytes")
        .with_language("english-but-too-long");
    assert_eq!(params.label.len(), LABEL_BYTES);
    assert_eq!(params.language.as_str(), "english-but-too-");
}
