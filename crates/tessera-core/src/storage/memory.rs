use log::debug;

use super::{DeviceRecord, DeviceStorage};
use crate::{mnemonic::MnemonicBuffer, recovery::truncated};

/// RAM-only storage for host builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    staged: DeviceRecord,
    committed: DeviceRecord,
    commits: u32,
}

impl MemoryStorage {
    pub const fn new() -> Self {
        Self {
            staged: DeviceRecord::new(),
            committed: DeviceRecord::new(),
            commits: 0,
        }
    }

    /// Record as of the last commit.
    pub fn committed(&self) -> &DeviceRecord {
        &self.committed
    }

    pub fn commit_count(&self) -> u32 {
        self.commits
    }
}

impl DeviceStorage for MemoryStorage {
    type Error = core::convert::Infallible;

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
        self.committed = self.staged.clone();
        self.commits = self.commits.saturating_add(1);
        debug!("storage: committed record #{}", self.commits);
        Ok(())
    }

    fn discard(&mut self) {
        self.staged = self.committed.clone();
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.staged.clear();
        self.committed.clear();
        debug!("storage: wiped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_stay_staged_until_commit() {
        let mut storage = MemoryStorage::new();
        storage.set_label("vault").unwrap();
        storage.set_passphrase_protection(true).unwrap();
        assert_eq!(storage.record().label.as_str(), "vault");
        assert!(storage.committed().label.is_empty());

        storage.commit().unwrap();
        assert_eq!(storage.committed().label.as_str(), "vault");
        assert_eq!(storage.committed().passphrase_protection, Some(true));
        assert_eq!(storage.commit_count(), 1);
    }

    #[test]
    fn discard_reverts_staged_to_committed() {
        let mut storage = MemoryStorage::new();
        storage.set_label("old").unwrap();
        storage.commit().unwrap();

        storage.set_label("new").unwrap();
        storage.set_language("english").unwrap();
        storage.discard();
        assert_eq!(storage.record(), storage.committed());
        assert_eq!(storage.record().label.as_str(), "old");
        assert!(storage.record().language.is_empty());
        assert_eq!(storage.commit_count(), 1);
    }

    #[test]
    fn reset_wipes_staged_and_committed_mnemonic() {
        let mut storage = MemoryStorage::new();
        let mut phrase = MnemonicBuffer::new();
        phrase.set("acid bolt");
        storage.set_mnemonic(&phrase).unwrap();
        storage.commit().unwrap();
        assert!(storage.committed().has_mnemonic);

        storage.reset().unwrap();
        assert!(!storage.record().has_mnemonic);
        assert!(!storage.committed().has_mnemonic);
        assert!(storage.committed().mnemonic.is_empty());
    }

    #[test]
    fn long_labels_are_truncated() {
        let mut storage = MemoryStorage::new();
        storage.set_label(&"x".repeat(40)).unwrap();
        assert_eq!(storage.record().label.len(), 32);
    }
}
