//! App-message dictionaries exchanged with the companion phone app.
//!
//! The transport delivers an ordered list of key/value tuples. The watchface
//! only ever reads integers out of it; the other value kinds exist so that a
//! dictionary from a newer companion still decodes and can be ignored.

/// Maximum number of tuples in one dictionary.
pub const MAX_TUPLES: usize = 16;

/// Maximum payload of a byte-array or string tuple.
pub const MAX_TUPLE_DATA: usize = 64;

/// Value carried by one tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleValue {
    /// Signed 32-bit integer
    Int(i32),
    /// Unsigned 32-bit integer
    UInt(u32),
    /// Raw bytes
    Bytes(heapless::Vec<u8, MAX_TUPLE_DATA>),
    /// UTF-8 string
    CString(heapless::String<MAX_TUPLE_DATA>),
}

impl TupleValue {
    /// Signed 32-bit reading of the value.
    ///
    /// Unsigned values are reinterpreted bit-for-bit, as the watch OS does
    /// when a handler reads `int32` from any integer tuple. Byte and string
    /// tuples carry no integer.
    #[allow(clippy::cast_possible_wrap)] // bit-for-bit reinterpretation is the contract
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => Some(*v as i32),
            Self::Bytes(_) | Self::CString(_) => None,
        }
    }
}

/// One key/value pair of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    /// Dictionary key
    pub key: u32,
    /// Value
    pub value: TupleValue,
}

impl Tuple {
    /// Integer tuple.
    pub fn int(key: u32, value: i32) -> Self {
        Self {
            key,
            value: TupleValue::Int(value),
        }
    }
}

/// An ordered dictionary as delivered by the message transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppMessage {
    tuples: heapless::Vec<Tuple, MAX_TUPLES>,
}

impl AppMessage {
    /// Empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tuple. Returns it back if the dictionary is full.
    pub fn push(&mut self, tuple: Tuple) -> Result<(), Tuple> {
        self.tuples.push(tuple)
    }

    /// Tuples in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    /// First tuple with `key`.
    pub fn find(&self, key: u32) -> Option<&Tuple> {
        self.tuples.iter().find(|t| t.key == key)
    }

    /// Number of tuples.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// `true` when the dictionary holds no tuples.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

/// Transport-level result codes reported with dropped or failed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppMessageResult {
    /// Success
    Ok,
    /// The other side did not acknowledge in time
    SendTimeout,
    /// The other side rejected the message
    SendRejected,
    /// No connection to the phone
    NotConnected,
    /// The companion app is not running
    AppNotRunning,
    /// Malformed dictionary or arguments
    InvalidArgs,
    /// A previous message is still pending
    Busy,
    /// The message did not fit the transport buffer
    BufferOverflow,
    /// The channel is closed
    Closed,
    /// Transport internal error
    InternalError,
    /// Allocation failure in the transport
    OutOfMemory,
}

impl core::fmt::Display for AppMessageResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::SendTimeout => "send timeout",
            Self::SendRejected => "send rejected",
            Self::NotConnected => "not connected",
            Self::AppNotRunning => "app not running",
            Self::InvalidArgs => "invalid arguments",
            Self::Busy => "busy",
            Self::BufferOverflow => "buffer overflow",
            Self::Closed => "closed",
            Self::InternalError => "internal error",
            Self::OutOfMemory => "out of memory",
        };
        f.write_str(s)
    }
}
