use std::{
    collections::VecDeque,
    convert::Infallible,
    fmt,
    io::{self, BufRead},
    sync::mpsc::{self, Receiver},
    thread,
};

use tessera_core::{
    input::{Button, InputEvent},
    messages::{DeviceMessage, HostMessage, Transport},
    recovery::RecoveryParams,
};

pub(super) const HELP: &str = "\
commands:
  recover [12|18|24]  start a recovery (flags supply the rest)
  ack [text]          answer a word request (empty text answers an empty word)
  cancel | initialize abort from the host
  state               debug link state query
  next | ok           press and release a button
  hold <polls>        hold next for that many polls, then release
  show                redraw the screen
  quit";

/// One parsed console line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Command {
    Host(HostMessage),
    Press(Button),
    Hold { polls: u16 },
    Show,
    Help,
    Quit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum ParseError {
    Empty,
    Unknown(String),
    BadNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty line"),
            Self::Unknown(word) => write!(f, "unknown command '{word}' (try 'help')"),
            Self::BadNumber(word) => write!(f, "expected a number, got '{word}'"),
        }
    }
}

pub(super) fn parse_command(line: &str, defaults: &RecoveryParams) -> Result<Command, ParseError> {
    let mut parts = line.split_whitespace();
    let head = parts.next().ok_or(ParseError::Empty)?;
    let arg = parts.next();

    let command = match head {
        "recover" | "r" => {
            let mut params = defaults.clone();
            if let Some(arg) = arg {
                params.word_count = parse_number(arg)?;
            }
            Command::Host(HostMessage::RecoveryDevice(params))
        }
        "ack" | "a" => Command::Host(HostMessage::word_ack(arg.unwrap_or(""))),
        "cancel" => Command::Host(HostMessage::Cancel),
        "initialize" | "init" => Command::Host(HostMessage::Initialize),
        "state" => Command::Host(HostMessage::DebugLinkGetState),
        "next" | "n" => Command::Press(Button::Next),
        "ok" | "c" => Command::Press(Button::Confirm),
        "hold" | "h" => Command::Hold {
            polls: arg.map(parse_number::<u16>).transpose()?.unwrap_or(20),
        },
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::BadNumber(word.to_string()))
}

/// Button events a command expands to, in order.
pub(super) fn button_events(command: &Command) -> Vec<InputEvent> {
    match *command {
        Command::Press(button) => vec![InputEvent::Down(button), InputEvent::Up(button)],
        Command::Hold { polls } => {
            let mut events = Vec::with_capacity(usize::from(polls) + 2);
            events.push(InputEvent::Down(Button::Next));
            events.extend((1..=polls).map(|polls| InputEvent::Held {
                button: Button::Next,
                polls,
            }));
            events.push(InputEvent::Up(Button::Next));
            events
        }
        _ => Vec::new(),
    }
}

/// Reads stdin lines on a helper thread so the device loop never blocks.
pub(super) fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Transport whose inbox is filled by the console and whose replies are
/// printed.
#[derive(Debug, Default)]
pub(super) struct ConsoleTransport {
    inbox: VecDeque<HostMessage>,
    sent: usize,
}

impl ConsoleTransport {
    pub(super) fn push(&mut self, message: HostMessage) {
        self.inbox.push_back(message);
    }

    pub(super) fn sent(&self) -> usize {
        self.sent
    }
}

impl Transport for ConsoleTransport {
    type Error = Infallible;

    fn poll_message(&mut self) -> Result<Option<HostMessage>, Self::Error> {
        Ok(self.inbox.pop_front())
    }

    fn send(&mut self, message: DeviceMessage<'_>) -> Result<(), Self::Error> {
        self.sent += 1;
        match message {
            DeviceMessage::WordRequest => println!("<- WordRequest"),
            DeviceMessage::Success { message } => println!("<- Success: {message}"),
            DeviceMessage::Failure {
                code, message, ..
            } => println!("<- Failure({code:?}): {message}"),
            DeviceMessage::DebugLinkState {
                state,
                word_pos,
                remaining_letters,
            } => println!(
                "<- DebugLinkState state={state:?} word_pos={word_pos} remaining_letters={remaining_letters}"
            ),
        }
        Ok(())
    }
}
