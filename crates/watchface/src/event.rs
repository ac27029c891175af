//! Events delivered to the watchface by its host runtime.

use platform::config::TIME_OFFSET_KEY;
use platform::{AppMessage, AppMessageResult, WallTime};

/// One host event. The runtime delivers them one at a time, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// Minute tick with the clock reading it fired at
    Tick(WallTime),
    /// The companion sent a new offset, in minutes
    OffsetReceived(i32),
    /// An inbound message was dropped by the transport
    InboxDropped(AppMessageResult),
    /// An outbound message was acknowledged
    OutboxSent,
    /// An outbound message failed
    OutboxFailed(AppMessageResult),
    /// Orderly shutdown
    ShutdownRequested,
}

/// Events carried by a received dictionary.
///
/// One [`WatchEvent::OffsetReceived`] per tuple under the offset key that
/// holds an integer, in dictionary order. Everything else is ignored.
pub fn events_from_inbox(message: &AppMessage) -> impl Iterator<Item = WatchEvent> + '_ {
    message
        .iter()
        .filter(|tuple| tuple.key == TIME_OFFSET_KEY.get())
        .filter_map(|tuple| tuple.value.as_i32())
        .map(WatchEvent::OffsetReceived)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::{Tuple, TupleValue};

    fn offsets(message: &AppMessage) -> Vec<WatchEvent> {
        events_from_inbox(message).collect()
    }

    #[test]
    fn test_offset_tuple_becomes_event() {
        let mut msg = AppMessage::new();
        msg.push(Tuple::int(TIME_OFFSET_KEY.get(), -300)).unwrap();
        assert_eq!(offsets(&msg), vec![WatchEvent::OffsetReceived(-300)]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut msg = AppMessage::new();
        msg.push(Tuple::int(7, 42)).unwrap();
        assert!(offsets(&msg).is_empty());
        assert!(offsets(&AppMessage::new()).is_empty());
    }

    #[test]
    fn test_non_integer_offset_ignored() {
        let mut msg = AppMessage::new();
        msg.push(Tuple {
            key: TIME_OFFSET_KEY.get(),
            value: TupleValue::CString(heapless::String::try_from("60").unwrap()),
        })
        .unwrap();
        assert!(offsets(&msg).is_empty());
    }

    #[test]
    fn test_unsigned_offset_reinterpreted() {
        let mut msg = AppMessage::new();
        msg.push(Tuple {
            key: TIME_OFFSET_KEY.get(),
            value: TupleValue::UInt(u32::MAX),
        })
        .unwrap();
        assert_eq!(offsets(&msg), vec![WatchEvent::OffsetReceived(-1)]);
    }

    #[test]
    fn test_repeated_key_kept_in_order() {
        let mut msg = AppMessage::new();
        msg.push(Tuple::int(TIME_OFFSET_KEY.get(), 10)).unwrap();
        msg.push(Tuple::int(2, 99)).unwrap();
        msg.push(Tuple::int(TIME_OFFSET_KEY.get(), 20)).unwrap();
        assert_eq!(
            offsets(&msg),
            vec![WatchEvent::OffsetReceived(10), WatchEvent::OffsetReceived(20)]
        );
    }
}
