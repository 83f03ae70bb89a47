//! Host emulator: drives the recovery device from a console, renders the
//! panel as text and keeps the device record in a flash image.

use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::mpsc::TryRecvError,
    thread,
    time::Duration,
};

use clap::Parser;
use log::{LevelFilter, info, warn};
use oled128::FrameBuffer;
use rand_core::{OsRng, TryRngCore};
use tessera_core::{
    RecoveryDevice, TickResult, Wordlist,
    input::{InputEvent, mock::MockInput},
    pin::NoPin,
    recovery::{InputMode, RecoveryConfig, RecoveryParams},
};
use tessera_hal::{
    render::{FrameRenderer, dialog::DialogRenderer},
    storage::flash_storage::FlashStorage,
};

use host_link::{Command, ConsoleTransport};
use image_flash::ImageFlash;

#[path = "main/console.rs"]
mod console;
#[path = "main/host_link.rs"]
mod host_link;
#[path = "main/image_flash.rs"]
mod image_flash;

const TITLE: &str = "Tessera";
const FLASH_IMAGE_BYTES: usize = 4096;
const RECORD_OFFSET: u32 = 0;
const IDLE_POLL_MS: u64 = 20;
const INPUT_QUEUE: usize = 4;

/// Mnemonic recovery device emulator.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about, long_about = None)]
struct Cli {
    /// Words in the recovered mnemonic
    #[arg(long, default_value_t = 12)]
    words: u32,

    /// Pick words on the device instead of typing letters on the host
    #[arg(long)]
    scroll: bool,

    /// Device label stored on success
    #[arg(long, default_value = "")]
    label: String,

    /// Mark the recovered device as passphrase protected
    #[arg(long)]
    passphrase: bool,

    /// Accept phrases whose wordlist checksum does not match
    #[arg(long)]
    no_enforce: bool,

    /// Ask only for real letters
    #[arg(long)]
    no_decoys: bool,

    /// Persist the device record in this flash image file
    #[arg(long, value_name = "PATH")]
    flash: Option<PathBuf>,
}

impl Cli {
    fn recovery_params(&self) -> RecoveryParams {
        let mode = if self.scroll {
            InputMode::Scroll
        } else {
            InputMode::Letters
        };
        RecoveryParams::new(self.words)
            .with_passphrase_protection(self.passphrase)
            .with_language("english")
            .with_label(&self.label)
            .with_enforce_wordlist(!self.no_enforce)
            .with_input_mode(mode)
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let defaults = cli.recovery_params();

    let flash = match ImageFlash::open(cli.flash.as_deref(), FLASH_IMAGE_BYTES) {
        Ok(flash) => flash,
        Err(err) => {
            warn!("flash: cannot open image: {}", err);
            std::process::exit(1);
        }
    };
    let storage = match FlashStorage::new(flash, RECORD_OFFSET) {
        Ok(storage) => storage,
        Err(err) => {
            warn!("storage: cannot load record: {:?}", err);
            std::process::exit(1);
        }
    };

    let config = RecoveryConfig::default().with_decoys(!cli.no_decoys);
    let mut device = RecoveryDevice::new(
        Wordlist::english(),
        config,
        ConsoleTransport::default(),
        MockInput::<INPUT_QUEUE>::new(),
        storage,
        NoPin,
        OsRng.unwrap_err(),
    );
    let mut renderer = DialogRenderer::new(TITLE);
    let mut frame = FrameBuffer::new();
    let mut backlog: VecDeque<InputEvent> = VecDeque::new();
    let lines = host_link::spawn_stdin_reader();

    info!(
        "emulator: ready words={} mode={:?}",
        defaults.word_count, defaults.input_mode
    );
    println!("{}", host_link::HELP);

    loop {
        let mut force_render = false;
        match lines.try_recv() {
            Ok(line) => match host_link::parse_command(&line, &defaults) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => println!("{}", host_link::HELP),
                Ok(Command::Show) => force_render = true,
                Ok(Command::Host(message)) => device.transport_mut().push(message),
                Ok(command) => backlog.extend(host_link::button_events(&command)),
                Err(err) => println!("?? {err}"),
            },
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        // One button event per tick so held-scroll pacing stays visible.
        if device.input_mut().pending() == 0
            && let Some(event) = backlog.pop_front()
            && device.input_mut().push(event).is_err()
        {
            backlog.push_front(event);
        }

        if device.tick() == TickResult::RenderRequested || force_render {
            device.with_screen(|screen| renderer.render(screen, &mut frame));
            console::print_frame(&frame);
        }

        if device.aborted_by_initialize() {
            info!("emulator: host initialize interrupted the recovery");
            device.clear_aborted_by_initialize();
        }

        let delay_ms = u64::from(device.input_delay_ms()).max(IDLE_POLL_MS);
        thread::sleep(Duration::from_millis(delay_ms));
    }

    info!(
        "emulator: exiting after {} device messages",
        device.transport().sent()
    );
}
