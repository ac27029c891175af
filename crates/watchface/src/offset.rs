//! Offset Store: the companion-supplied UTC offset and its persistence lifecycle.
//!
//! ```text
//! Unloaded ──load──▶ Loaded(v) ──receive_offset──▶ Loaded(v') ──save──▶ Saved(v')
//! ```
//!
//! The value is read once at startup and written back once at orderly
//! shutdown. Offsets received in between only change the in-memory value,
//! so they are lost if the app is killed before it shuts down cleanly.

use platform::config::{DEFAULT_TIME_OFFSET, TIME_OFFSET_KEY};
use platform::{Persist, PersistError};

/// Lifecycle state of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetState {
    /// Nothing read yet
    Unloaded,
    /// In-memory offset, in minutes
    Loaded(i32),
    /// Offset written back; the store accepts no further changes
    Saved(i32),
}

/// Where a loaded offset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from persistent storage
    Persisted,
    /// Nothing stored yet; the default was used
    Default,
    /// Storage could not be read; the default was used
    ReadFailed(PersistError),
}

/// Result of [`OffsetStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loaded {
    /// Offset in minutes now held by the store
    pub value: i32,
    /// Where `value` came from
    pub source: LoadSource,
}

/// Offset store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStoreError {
    /// The store has not been loaded yet
    NotLoaded,
    /// `load` was called a second time
    AlreadyLoaded,
    /// The offset was already written back
    AlreadySaved,
    /// The write-back failed
    Persist(PersistError),
}

impl core::fmt::Display for OffsetStoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "Offset store not loaded"),
            Self::AlreadyLoaded => write!(f, "Offset store already loaded"),
            Self::AlreadySaved => write!(f, "Offset store already saved"),
            Self::Persist(e) => write!(f, "Offset store write failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OffsetStoreError {}

impl From<PersistError> for OffsetStoreError {
    fn from(err: PersistError) -> Self {
        Self::Persist(err)
    }
}

/// Holder of the time offset in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetStore {
    state: OffsetState,
}

impl Default for OffsetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetStore {
    /// Create an unloaded store.
    pub const fn new() -> Self {
        Self {
            state: OffsetState::Unloaded,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OffsetState {
        self.state
    }

    /// Read the persisted offset, checking that a record exists first.
    ///
    /// A missing record and a failed read both yield [`DEFAULT_TIME_OFFSET`];
    /// the returned [`LoadSource`] tells the caller which happened so it can
    /// log it. Only calling `load` twice is an error.
    pub fn load<P: Persist>(&mut self, persist: &mut P) -> Result<Loaded, OffsetStoreError> {
        match self.state {
            OffsetState::Unloaded => {}
            OffsetState::Loaded(_) => return Err(OffsetStoreError::AlreadyLoaded),
            OffsetState::Saved(_) => return Err(OffsetStoreError::AlreadySaved),
        }

        let stored = match persist.exists(TIME_OFFSET_KEY) {
            Ok(true) => persist.read_int(TIME_OFFSET_KEY),
            Ok(false) => Ok(None),
            Err(e) => Err(e),
        };
        let loaded = match stored {
            Ok(Some(value)) => Loaded {
                value,
                source: LoadSource::Persisted,
            },
            Ok(None) => Loaded {
                value: DEFAULT_TIME_OFFSET,
                source: LoadSource::Default,
            },
            Err(e) => Loaded {
                value: DEFAULT_TIME_OFFSET,
                source: LoadSource::ReadFailed(e),
            },
        };
        self.state = OffsetState::Loaded(loaded.value);
        Ok(loaded)
    }

    /// In-memory offset, `None` before `load`.
    ///
    /// Still readable after `save`.
    pub fn value(&self) -> Option<i32> {
        match self.state {
            OffsetState::Unloaded => None,
            OffsetState::Loaded(v) | OffsetState::Saved(v) => Some(v),
        }
    }

    /// Replace the in-memory offset. Does not persist.
    pub fn receive_offset(&mut self, value: i32) -> Result<(), OffsetStoreError> {
        match self.state {
            OffsetState::Unloaded => Err(OffsetStoreError::NotLoaded),
            OffsetState::Loaded(_) => {
                self.state = OffsetState::Loaded(value);
                Ok(())
            }
            OffsetState::Saved(_) => Err(OffsetStoreError::AlreadySaved),
        }
    }

    /// Write the offset back, overwriting any prior record.
    ///
    /// Performs exactly one write. On success the store becomes
    /// [`OffsetState::Saved`]; on failure it stays loaded so the caller may
    /// retry.
    pub fn save<P: Persist>(&mut self, persist: &mut P) -> Result<i32, OffsetStoreError> {
        let value = match self.state {
            OffsetState::Unloaded => return Err(OffsetStoreError::NotLoaded),
            OffsetState::Loaded(v) => v,
            OffsetState::Saved(_) => return Err(OffsetStoreError::AlreadySaved),
        };
        persist.write_int(TIME_OFFSET_KEY, value)?;
        self.state = OffsetState::Saved(value);
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::MockPersist;
    use platform::PersistKey;

    #[test]
    fn test_load_without_record_defaults_to_zero() {
        let mut persist = MockPersist::new();
        let mut store = OffsetStore::new();
        let loaded = store.load(&mut persist).unwrap();
        assert_eq!(loaded.value, 0);
        assert_eq!(loaded.source, LoadSource::Default);
        assert_eq!(store.value(), Some(0));
    }

    #[test]
    fn test_load_reads_persisted_value() {
        let mut persist = MockPersist::with_record(TIME_OFFSET_KEY, -330);
        let mut store = OffsetStore::new();
        let loaded = store.load(&mut persist).unwrap();
        assert_eq!(loaded.value, -330);
        assert_eq!(loaded.source, LoadSource::Persisted);
    }

    #[test]
    fn test_load_read_failure_falls_back_to_default() {
        let mut persist = MockPersist::with_record(TIME_OFFSET_KEY, 60);
        persist.fail_reads();
        let mut store = OffsetStore::new();
        let loaded = store.load(&mut persist).unwrap();
        assert_eq!(loaded.value, 0);
        assert_eq!(loaded.source, LoadSource::ReadFailed(PersistError::Io));
    }

    /// Records the order of persist calls.
    #[derive(Default)]
    struct CallLog {
        stored: Option<i32>,
        calls: Vec<&'static str>,
    }

    impl Persist for CallLog {
        fn exists(&mut self, _key: PersistKey) -> Result<bool, PersistError> {
            self.calls.push("exists");
            Ok(self.stored.is_some())
        }

        fn read_int(&mut self, _key: PersistKey) -> Result<Option<i32>, PersistError> {
            self.calls.push("read_int");
            Ok(self.stored)
        }

        fn write_int(&mut self, _key: PersistKey, value: i32) -> Result<(), PersistError> {
            self.calls.push("write_int");
            self.stored = Some(value);
            Ok(())
        }

        fn delete(&mut self, _key: PersistKey) -> Result<(), PersistError> {
            self.calls.push("delete");
            self.stored = None;
            Ok(())
        }
    }

    #[test]
    fn test_load_checks_existence_before_reading() {
        let mut persist = CallLog {
            stored: Some(90),
            ..CallLog::default()
        };
        let mut store = OffsetStore::new();
        assert_eq!(store.load(&mut persist).unwrap().value, 90);
        assert_eq!(persist.calls, ["exists", "read_int"]);
    }

    #[test]
    fn test_load_skips_read_when_nothing_stored() {
        let mut persist = CallLog::default();
        let mut store = OffsetStore::new();
        assert_eq!(store.load(&mut persist).unwrap().source, LoadSource::Default);
        assert_eq!(persist.calls, ["exists"]);
    }

    #[test]
    fn test_second_load_rejected() {
        let mut persist = MockPersist::new();
        let mut store = OffsetStore::new();
        store.load(&mut persist).unwrap();
        assert_eq!(store.load(&mut persist), Err(OffsetStoreError::AlreadyLoaded));
    }

    #[test]
    fn test_receive_offset_is_immediately_visible() {
        let mut persist = MockPersist::new();
        let mut store = OffsetStore::new();
        store.load(&mut persist).unwrap();
        store.receive_offset(120).unwrap();
        assert_eq!(store.value(), Some(120));
        assert_eq!(persist.writes(), 0, "receive_offset must not persist");
    }

    #[test]
    fn test_receive_before_load_rejected() {
        let mut store = OffsetStore::new();
        assert_eq!(store.receive_offset(5), Err(OffsetStoreError::NotLoaded));
        assert_eq!(store.value(), None);
    }

    #[test]
    fn test_save_writes_once_and_becomes_terminal() {
        let mut persist = MockPersist::new();
        let mut store = OffsetStore::new();
        store.load(&mut persist).unwrap();
        store.receive_offset(i32::MIN).unwrap();
        assert_eq!(store.save(&mut persist), Ok(i32::MIN));
        assert_eq!(persist.writes(), 1);
        assert_eq!(persist.peek(TIME_OFFSET_KEY), Some(i32::MIN));
        assert_eq!(store.state(), OffsetState::Saved(i32::MIN));
        assert_eq!(store.save(&mut persist), Err(OffsetStoreError::AlreadySaved));
        assert_eq!(store.receive_offset(1), Err(OffsetStoreError::AlreadySaved));
        assert_eq!(persist.writes(), 1);
    }

    #[test]
    fn test_save_before_load_rejected() {
        let mut persist = MockPersist::new();
        let mut store = OffsetStore::new();
        assert_eq!(store.save(&mut persist), Err(OffsetStoreError::NotLoaded));
        assert_eq!(persist.writes(), 0);
    }

    #[test]
    fn test_save_then_reload_round_trips() {
        let mut persist = MockPersist::new();
        let mut first = OffsetStore::new();
        first.load(&mut persist).unwrap();
        first.receive_offset(i32::MAX).unwrap();
        first.save(&mut persist).unwrap();

        let mut second = OffsetStore::new();
        assert_eq!(second.load(&mut persist).unwrap().value, i32::MAX);
    }
}
