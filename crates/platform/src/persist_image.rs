//! Binary image of the persisted records.
//!
//! Layout:
//! ```text
//! [0..4]   magic          b"WFPS"
//! [4]      version        u8 = 1
//! [5..8]   _pad           [u8; 3]
//! [8..12]  payload_crc    u32 le  (CRC32 of the payload)
//! [12..16] payload_len    u32 le
//! [16..]   payload        postcard-encoded record list
//! ```

use serde::{Deserialize, Serialize};

use crate::persist::{PersistError, PersistKey};

/// Maximum number of records an image can hold.
pub const MAX_RECORDS: usize = 16;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Upper bound for an encoded payload (16 × two 5-byte varints + length prefix).
pub const MAX_PAYLOAD: usize = 192;

/// Upper bound for a whole encoded image.
pub const MAX_IMAGE: usize = HEADER_SIZE + MAX_PAYLOAD;

const MAGIC: &[u8; 4] = b"WFPS";
const VERSION: u8 = 1;

/// One persisted integer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Record {
    key: u32,
    value: i32,
}

/// In-memory set of persisted records, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistImage {
    records: heapless::Vec<Record, MAX_RECORDS>,
}

impl PersistImage {
    /// Create an empty image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when no record is held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: PersistKey) -> Option<i32> {
        self.records
            .iter()
            .find(|r| r.key == key.get())
            .map(|r| r.value)
    }

    /// Insert or overwrite the record under `key`.
    pub fn set(&mut self, key: PersistKey, value: i32) -> Result<(), PersistError> {
        if let Some(record) = self.records.iter_mut().find(|r| r.key == key.get()) {
            record.value = value;
            return Ok(());
        }
        self.records
            .push(Record {
                key: key.get(),
                value,
            })
            .map_err(|_| PersistError::Full)
    }

    /// Remove the record under `key`. Returns `true` if one was removed.
    pub fn remove(&mut self, key: PersistKey) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.key != key.get());
        self.records.len() != before
    }

    /// Encode the image into `out`, returning the number of bytes written.
    pub fn encode(&self, out: &mut [u8; MAX_IMAGE]) -> Result<usize, PersistError> {
        let (header, body) = out.split_at_mut(HEADER_SIZE);
        let payload = postcard::to_slice(self, body).map_err(|_| PersistError::Full)?;
        let payload_len = u32::try_from(payload.len()).map_err(|_| PersistError::Full)?;
        let crc = crc32fast::hash(payload);
        let total = HEADER_SIZE
            .checked_add(payload.len())
            .ok_or(PersistError::Full)?;

        header.fill(0);
        header
            .get_mut(0..4)
            .ok_or(PersistError::Full)?
            .copy_from_slice(MAGIC);
        if let Some(v) = header.get_mut(4) {
            *v = VERSION;
        }
        header
            .get_mut(8..12)
            .ok_or(PersistError::Full)?
            .copy_from_slice(&crc.to_le_bytes());
        header
            .get_mut(12..16)
            .ok_or(PersistError::Full)?
            .copy_from_slice(&payload_len.to_le_bytes());
        Ok(total)
    }

    /// Decode and validate an image.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Corrupt`] on a bad magic, unknown version,
    /// length mismatch, CRC mismatch or undecodable payload.
    pub fn decode(bytes: &[u8]) -> Result<Self, PersistError> {
        if bytes.get(0..4) != Some(MAGIC.as_ref()) {
            return Err(PersistError::Corrupt);
        }
        if bytes.get(4).copied() != Some(VERSION) {
            return Err(PersistError::Corrupt);
        }
        let crc = read_u32(bytes, 8)?;
        let len = usize::try_from(read_u32(bytes, 12)?).map_err(|_| PersistError::Corrupt)?;
        let end = HEADER_SIZE.checked_add(len).ok_or(PersistError::Corrupt)?;
        if end != bytes.len() {
            return Err(PersistError::Corrupt);
        }
        let payload = bytes.get(HEADER_SIZE..end).ok_or(PersistError::Corrupt)?;
        if crc32fast::hash(payload) != crc {
            return Err(PersistError::Corrupt);
        }
        postcard::from_bytes(payload).map_err(|_| PersistError::Corrupt)
    }
}

fn read_u32(bytes: &[u8], at: usize) -> Result<u32, PersistError> {
    let end = at.checked_add(4).ok_or(PersistError::Corrupt)?;
    let raw: [u8; 4] = bytes
        .get(at..end)
        .and_then(|s| s.try_into().ok())
        .ok_or(PersistError::Corrupt)?;
    Ok(u32::from_le_bytes(raw))
}
