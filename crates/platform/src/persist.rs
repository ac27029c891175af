//! Durable key/value persistence
//!
//! Modeled on the watch OS persist API: a small number of integer records,
//! each addressed by a numeric key, that survive application restarts.

/// Key of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistKey(u32);

impl PersistKey {
    /// Wrap a raw key.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric key.
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Persistence trait for durable integer records
pub trait Persist {
    /// Return `true` if a record exists under `key`.
    fn exists(&mut self, key: PersistKey) -> Result<bool, PersistError>;

    /// Read the integer stored under `key`, `None` if absent.
    fn read_int(&mut self, key: PersistKey) -> Result<Option<i32>, PersistError>;

    /// Store `value` under `key`, replacing any previous record.
    fn write_int(&mut self, key: PersistKey, value: i32) -> Result<(), PersistError>;

    /// Remove the record under `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: PersistKey) -> Result<(), PersistError>;
}

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// No room for another record
    Full,
    /// Backing storage could not be read or written
    Io,
    /// Stored image failed validation
    Corrupt,
}

#[cfg(feature = "std")]
impl std::error::Error for PersistError {}

impl core::fmt::Display for PersistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "Persist storage is full"),
            Self::Io => write!(f, "Persist storage I/O failure"),
            Self::Corrupt => write!(f, "Persist storage is corrupt"),
        }
    }
}
