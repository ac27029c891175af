//! Local filesystem `Persist` implementation for the desktop emulator.
//!
//! `LocalPersist` implements `platform::Persist` on top of a single image file
//! (see [`crate::persist_image`]). Used when the `std` feature is enabled
//! (emulator builds and tests). The whole image is rewritten on every change and
//! swapped in with a rename, so a crash mid-write leaves the old image intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror_no_std::Error;

use crate::persist::{Persist, PersistError, PersistKey};
use crate::persist_image::{PersistImage, MAX_IMAGE};

/// Environment variable naming the persistence file on desktop runs.
pub const PERSIST_PATH_ENV: &str = "WATCHFACE_PERSIST_PATH";

/// Error type for local filesystem persistence.
#[derive(Debug, Error)]
pub enum LocalPersistError {
    /// The image file could not be read or replaced.
    #[error("local persist I/O error: {0}")]
    Io(#[from] io::Error),
    /// The record set no longer fits in one image.
    #[error("local persist image is full")]
    Full,
}

impl From<LocalPersistError> for PersistError {
    fn from(err: LocalPersistError) -> Self {
        match err {
            LocalPersistError::Io(_) => PersistError::Io,
            LocalPersistError::Full => PersistError::Full,
        }
    }
}

/// A `platform::Persist` implementation backed by one file.
///
/// An image that fails validation does not prevent opening: reads report
/// [`PersistError::Corrupt`] until the next successful write replaces the
/// file with a fresh image.
///
/// # Example
/// ```no_run
/// use platform::persist_local::LocalPersist;
/// use platform::{Persist, config::TIME_OFFSET_KEY};
///
/// let mut persist = LocalPersist::open("/tmp/watchface.bin").unwrap();
/// persist.write_int(TIME_OFFSET_KEY, -300).unwrap();
/// ```
pub struct LocalPersist {
    path: PathBuf,
    image: PersistImage,
    corrupt: bool,
}

impl LocalPersist {
    /// Open the image at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocalPersistError> {
        let path = path.as_ref().to_path_buf();
        let (image, corrupt) = match fs::read(&path) {
            Ok(bytes) => match PersistImage::decode(&bytes) {
                Ok(image) => (image, false),
                Err(_) => (PersistImage::new(), true),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => (PersistImage::new(), false),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            image,
            corrupt,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` while the file on disk holds an image that failed validation.
    pub fn is_corrupt(&self) -> bool {
        self.corrupt
    }

    fn readable(&self) -> Result<&PersistImage, PersistError> {
        if self.corrupt {
            Err(PersistError::Corrupt)
        } else {
            Ok(&self.image)
        }
    }

    /// Image the next change applies to; a corrupt file starts over empty.
    fn staged(&self) -> PersistImage {
        if self.corrupt {
            PersistImage::new()
        } else {
            self.image.clone()
        }
    }

    /// Write `image` to disk, then adopt it as the in-memory state.
    fn commit(&mut self, image: PersistImage) -> Result<(), LocalPersistError> {
        let mut buf = [0u8; MAX_IMAGE];
        let len = image.encode(&mut buf).map_err(|_| LocalPersistError::Full)?;
        let bytes = buf.get(..len).ok_or(LocalPersistError::Full)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;

        self.image = image;
        self.corrupt = false;
        Ok(())
    }
}

impl Persist for LocalPersist {
    fn exists(&mut self, key: PersistKey) -> Result<bool, PersistError> {
        Ok(self.readable()?.get(key).is_some())
    }

    fn read_int(&mut self, key: PersistKey) -> Result<Option<i32>, PersistError> {
        Ok(self.readable()?.get(key))
    }

    fn write_int(&mut self, key: PersistKey, value: i32) -> Result<(), PersistError> {
        let mut image = self.staged();
        image.set(key, value)?;
        self.commit(image).map_err(PersistError::from)
    }

    fn delete(&mut self, key: PersistKey) -> Result<(), PersistError> {
        let mut image = self.staged();
        if image.remove(key) || self.corrupt {
            self.commit(image).map_err(PersistError::from)?;
        }
        Ok(())
    }
}
