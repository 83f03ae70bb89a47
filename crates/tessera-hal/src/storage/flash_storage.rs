use core::str;

use embedded_storage::Storage;
use log::{debug, info, warn};
use tessera_core::{
    mnemonic::{MNEMONIC_BYTES, MnemonicBuffer},
    recovery::{LABEL_BYTES, LANGUAGE_BYTES, truncated},
    storage::{DeviceRecord, DeviceStorage},
};
use zeroize::Zeroize;

const RECORD_MAGIC: [u8; 4] = *b"TSR1";
const RECORD_VERSION: u8 = 1;

const FLAG_PASSPHRASE_SET: u8 = 0x01;
const FLAG_PASSPHRASE_ON: u8 = 0x02;
const FLAG_HAS_MNEMONIC: u8 = 0x04;

const LABEL_AT: usize = 8;
const LANGUAGE_AT: usize = LABEL_AT + LABEL_BYTES;
const MNEMONIC_LEN_AT: usize = LANGUAGE_AT + LANGUAGE_BYTES;
const MNEMONIC_AT: usize = MNEMONIC_LEN_AT + 2;
const CHECKSUM_AT: usize = MNEMONIC_AT + MNEMONIC_BYTES;

/// Serialized record size in bytes.
pub const RECORD_LEN: usize = CHECKSUM_AT + 4;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FlashStorageError<E> {
    Flash(E),
    /// The record region does not fit inside the flash capacity.
    OutOfRange,
    /// Magic and version matched but the checksum or a field did not.
    Corrupted,
}

/// Device record persisted in one fixed flash region.
///
/// Setters stage changes in RAM. `commit` rewrites the region, `reset`
/// overwrites it with erased bytes.
#[derive(Debug)]
pub struct FlashStorage<F> {
    flash: F,
    offset: u32,
    staged: DeviceRecord,
    committed: DeviceRecord,
}

impl<F: Storage> FlashStorage<F> {
    /// Opens the region at `offset` and loads the committed record. Blank or
    /// foreign regions load as an empty record.
    pub fn new(mut flash: F, offset: u32) -> Result<Self, FlashStorageError<F::Error>> {
        let end = (offset as usize).checked_add(RECORD_LEN);
        if end.is_none_or(|end| end > flash.capacity()) {
            return Err(FlashStorageError::OutOfRange);
        }

        let committed = load_record(&mut flash, offset)?;
        info!(
            "storage: loaded record has_mnemonic={} label_len={}",
            committed.has_mnemonic,
            committed.label.len()
        );

        Ok(Self {
            flash,
            offset,
            staged: committed.clone(),
            committed,
        })
    }

    /// Record as of the last commit or load.
    pub fn committed(&self) -> &DeviceRecord {
        &self.committed
    }

    pub fn release(self) -> F {
        self.flash
    }
}

impl<F: Storage> DeviceStorage for FlashStorage<F> {
    type Error = FlashStorageError<F::Error>;

    fn record(&self) -> &DeviceRecord {
        &self.staged
    }

    fn set_label(&mut self, label: &str) -> Result<(), Self::Error> {
        self.staged.label = truncated(label);
        Ok(())
    }

    fn set_language(&mut self, language: &str) -> Result<(), Self::Error> {
        self.staged.language = truncated(language);
        Ok(())
    }

    fn set_passphrase_protection(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.staged.passphrase_protection = Some(enabled);
        Ok(())
    }

    fn set_mnemonic(&mut self, mnemonic: &MnemonicBuffer) -> Result<(), Self::Error> {
        self.staged.mnemonic = mnemonic.clone();
        self.staged.has_mnemonic = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        let mut buf = encode_record(&self.staged);
        let written = self.flash.write(self.offset, &buf);
        buf.zeroize();
        written.map_err(FlashStorageError::Flash)?;

        self.committed = self.staged.clone();
        debug!("storage: committed {} bytes at {:#x}", RECORD_LEN, self.offset);
        Ok(())
    }

    fn discard(&mut self) {
        self.staged = self.committed.clone();
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.staged.clear();
        self.committed.clear();
        self.flash
            .write(self.offset, &[0xFFu8; RECORD_LEN])
            .map_err(FlashStorageError::Flash)?;
        debug!("storage: wiped record at {:#x}", self.offset);
        Ok(())
    }
}

fn load_record<F: Storage>(
    flash: &mut F,
    offset: u32,
) -> Result<DeviceRecord, FlashStorageError<F::Error>> {
    let mut buf = [0u8; RECORD_LEN];
    flash
        .read(offset, &mut buf)
        .map_err(FlashStorageError::Flash)?;
    let record = decode_record(&buf);
    buf.zeroize();
    record
}

fn encode_record(record: &DeviceRecord) -> [u8; RECORD_LEN] {
    let mut buf = [0u8; RECORD_LEN];
    buf[0..4].copy_from_slice(&RECORD_MAGIC);
    buf[4] = RECORD_VERSION;

    let mut flags = 0u8;
    if let Some(enabled) = record.passphrase_protection {
        flags |= FLAG_PASSPHRASE_SET;
        if enabled {
            flags |= FLAG_PASSPHRASE_ON;
        }
    }
    if record.has_mnemonic {
        flags |= FLAG_HAS_MNEMONIC;
    }
    buf[5] = flags;
    buf[6] = record.label.len() as u8;
    buf[7] = record.language.len() as u8;

    buf[LABEL_AT..LABEL_AT + record.label.len()].copy_from_slice(record.label.as_bytes());
    buf[LANGUAGE_AT..LANGUAGE_AT + record.language.len()]
        .copy_from_slice(record.language.as_bytes());

    let mnemonic = record.mnemonic.as_str().as_bytes();
    buf[MNEMONIC_LEN_AT..MNEMONIC_AT].copy_from_slice(&(mnemonic.len() as u16).to_le_bytes());
    buf[MNEMONIC_AT..MNEMONIC_AT + mnemonic.len()].copy_from_slice(mnemonic);

    let checksum = checksum32(&buf[..CHECKSUM_AT]);
    buf[CHECKSUM_AT..].copy_from_slice(&checksum.to_le_bytes());
    buf
}

fn decode_record<E>(buf: &[u8; RECORD_LEN]) -> Result<DeviceRecord, FlashStorageError<E>> {
    if buf[0..4] != RECORD_MAGIC {
        if buf.iter().any(|b| *b != 0xFF) {
            warn!("storage: unrecognized record magic, treating as empty");
        }
        return Ok(DeviceRecord::new());
    }
    if buf[4] != RECORD_VERSION {
        warn!("storage: unsupported record version {}", buf[4]);
        return Ok(DeviceRecord::new());
    }

    let expected = u32::from_le_bytes([
        buf[CHECKSUM_AT],
        buf[CHECKSUM_AT + 1],
        buf[CHECKSUM_AT + 2],
        buf[CHECKSUM_AT + 3],
    ]);
    if checksum32(&buf[..CHECKSUM_AT]) != expected {
        return Err(FlashStorageError::Corrupted);
    }

    let flags = buf[5];
    let label_len = usize::from(buf[6]);
    let language_len = usize::from(buf[7]);
    let mnemonic_len = usize::from(u16::from_le_bytes([
        buf[MNEMONIC_LEN_AT],
        buf[MNEMONIC_LEN_AT + 1],
    ]));
    if label_len > LABEL_BYTES || language_len > LANGUAGE_BYTES || mnemonic_len > MNEMONIC_BYTES
    {
        return Err(FlashStorageError::Corrupted);
    }

    let label = str::from_utf8(&buf[LABEL_AT..LABEL_AT + label_len])
        .map_err(|_| FlashStorageError::Corrupted)?;
    let language = str::from_utf8(&buf[LANGUAGE_AT..LANGUAGE_AT + language_len])
        .map_err(|_| FlashStorageError::Corrupted)?;
    let mnemonic = str::from_utf8(&buf[MNEMONIC_AT..MNEMONIC_AT + mnemonic_len])
        .map_err(|_| FlashStorageError::Corrupted)?;

    let mut record = DeviceRecord::new();
    record.label = truncated(label);
    record.language = truncated(language);
    record.passphrase_protection = if flags & FLAG_PASSPHRASE_SET != 0 {
        Some(flags & FLAG_PASSPHRASE_ON != 0)
    } else {
        None
    };
    record.has_mnemonic = flags & FLAG_HAS_MNEMONIC != 0;
    record.mnemonic.set(mnemonic);
    Ok(record)
}

fn checksum32(bytes: &[u8]) -> u32 {
    let mut hash = 0x811C9DC5u32;
    for b in bytes {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(16777619);
    }
    hash
}
