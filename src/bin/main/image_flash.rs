use std::{
    fs, io,
    path::{Path, PathBuf},
};

use embedded_storage::{ReadStorage, Storage};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum ImageFlashError {
    OutOfBounds,
    Io(io::ErrorKind),
}

/// RAM flash image, optionally mirrored to a file after every write.
#[derive(Debug)]
pub(super) struct ImageFlash {
    bytes: Vec<u8>,
    path: Option<PathBuf>,
}

impl ImageFlash {
    /// Loads `path` when it exists; missing or short images are padded with
    /// erased bytes.
    pub(super) fn open(path: Option<&Path>, capacity: usize) -> io::Result<Self> {
        let mut bytes = match path {
            Some(path) if path.exists() => fs::read(path)?,
            _ => Vec::new(),
        };
        if bytes.len() != capacity {
            debug!(
                "flash: resizing image from {} to {} bytes",
                bytes.len(),
                capacity
            );
            bytes.resize(capacity, 0xFF);
        }

        Ok(Self {
            bytes,
            path: path.map(Path::to_path_buf),
        })
    }

    fn range(&self, offset: u32, len: usize) -> Result<std::ops::Range<usize>, ImageFlashError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(ImageFlashError::OutOfBounds)?;
        if end > self.bytes.len() {
            return Err(ImageFlashError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl ReadStorage for ImageFlash {
    type Error = ImageFlashError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let range = self.range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for ImageFlash {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let range = self.range(offset, bytes.len())?;
        self.bytes[range].copy_from_slice(bytes);

        if let Some(path) = &self.path {
            fs::write(path, &self.bytes).map_err(|err| {
                warn!("flash: image write to {} failed: {}", path.display(), err);
                ImageFlashError::Io(err.kind())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_image_starts_erased_and_bounds_checks() {
        let mut flash = ImageFlash::open(None, 64).unwrap();
        let mut buf = [0u8; 4];
        flash.read(60, &mut buf).unwrap();
        assert_eq!(buf, [0xFF; 4]);

        flash.write(0, &[1, 2, 3]).unwrap();
        flash.read(0, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 0xFF]);

        assert_eq!(flash.read(62, &mut buf), Err(ImageFlashError::OutOfBounds));
        assert_eq!(flash.write(u32::MAX, &[0]), Err(ImageFlashError::OutOfBounds));
    }
}
