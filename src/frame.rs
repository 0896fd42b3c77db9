// src/frame.rs

//! Binary layout of a lifecycle notification frame.
//!
//! A logical notification is a two-part message: part 0 is a fixed 6-byte
//! frame (16-bit event code, then 32-bit event value, both little-endian as
//! dictated by the transport's monitor-event encoding), part 1 carries the
//! source endpoint address. The layout is fixed protocol knowledge and must
//! not be altered.

use crate::diag::DiagnosticSink;
use crate::events::{EventKind, SocketEvent};
use crate::message::Msg;

/// Length of the fixed event frame (2-byte code + 4-byte value).
pub const EVENT_FRAME_LEN: usize = 6;

/// Number of parts in a well-formed notification (event frame + endpoint).
pub const NOTIFICATION_PARTS: usize = 2;

/// Encodes a raw `(code, value)` pair into the 6-byte wire frame.
pub fn encode_frame(code: u16, value: u32) -> [u8; EVENT_FRAME_LEN] {
  let mut frame = [0u8; EVENT_FRAME_LEN];
  frame[0..2].copy_from_slice(&code.to_le_bytes());
  frame[2..6].copy_from_slice(&value.to_le_bytes());
  frame
}

/// Decodes the 6-byte wire frame back into its raw `(code, value)` pair.
///
/// Returns `None` unless the slice is exactly [`EVENT_FRAME_LEN`] bytes. The
/// assembly is explicitly little-endian over the raw byte values; it does not
/// depend on the host's native endianness.
pub fn decode_frame(frame: &[u8]) -> Option<(u16, u32)> {
  if frame.len() != EVENT_FRAME_LEN {
    return None;
  }
  let code = u16::from_le_bytes([frame[0], frame[1]]);
  let value = u32::from_le_bytes([frame[2], frame[3], frame[4], frame[5]]);
  Some((code, value))
}

/// Decodes one logical notification into a [`SocketEvent`].
///
/// Never fails and never panics: a notification without exactly two parts,
/// or whose first part is not a 6-byte frame, yields the sentinel
/// `(EventKind::Error, 0)` so a single malformed notification degrades one
/// event instead of killing monitoring for the socket's remaining lifetime.
/// The raw parts of a malformed notification, and any unknown event code,
/// are reported to `sink`.
pub fn decode_event(parts: &[Msg], sink: &dyn DiagnosticSink) -> SocketEvent {
  if parts.len() != NOTIFICATION_PARTS {
    sink.malformed_notification(parts);
    return SocketEvent::new(EventKind::Error, 0);
  }
  let frame = parts[0].data().unwrap_or(&[]);
  let Some((code, value)) = decode_frame(frame) else {
    sink.malformed_notification(parts);
    return SocketEvent::new(EventKind::Error, 0);
  };
  let kind = EventKind::from_raw(code);
  if let EventKind::Unknown(raw) = kind {
    sink.unknown_event_code(raw);
  }
  SocketEvent::new(kind, value)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  #[derive(Default)]
  struct RecordingSink {
    unknown: Mutex<Vec<u16>>,
    malformed: Mutex<Vec<usize>>,
  }

  impl DiagnosticSink for RecordingSink {
    fn unknown_event_code(&self, raw: u16) {
      self.unknown.lock().unwrap().push(raw);
    }

    fn malformed_notification(&self, parts: &[Msg]) {
      self.malformed.lock().unwrap().push(parts.len());
    }
  }

  fn notification(frame: &[u8]) -> Vec<Msg> {
    vec![Msg::from_vec(frame.to_vec()), Msg::from_static(b"inproc://src")]
  }

  #[test]
  fn decodes_connected_event() {
    let sink = RecordingSink::default();
    let parts = notification(&[0x01, 0x00, 0x2A, 0x00, 0x00, 0x00]);
    let event = decode_event(&parts, &sink);
    assert_eq!(event, SocketEvent::new(EventKind::Connected, 42));
    assert!(sink.unknown.lock().unwrap().is_empty());
    assert!(sink.malformed.lock().unwrap().is_empty());
  }

  #[test]
  fn value_assembly_is_little_endian() {
    let parts = notification(&[0x00, 0x04, 0x78, 0x56, 0x34, 0x12]);
    let event = decode_event(&parts, &RecordingSink::default());
    assert_eq!(event, SocketEvent::new(EventKind::MonitorStopped, 0x1234_5678));
  }

  #[test]
  fn single_part_notification_degrades_to_error_sentinel() {
    let sink = RecordingSink::default();
    let parts = vec![Msg::from_vec(encode_frame(0x0001, 7).to_vec())];
    let event = decode_event(&parts, &sink);
    assert_eq!(event, SocketEvent::new(EventKind::Error, 0));
    assert_eq!(*sink.malformed.lock().unwrap(), vec![1]);
  }

  #[test]
  fn truncated_frame_degrades_to_error_sentinel() {
    let sink = RecordingSink::default();
    let parts = vec![Msg::from_static(b"\x01\x00\x2A"), Msg::from_static(b"ep")];
    let event = decode_event(&parts, &sink);
    assert_eq!(event, SocketEvent::new(EventKind::Error, 0));
    assert_eq!(*sink.malformed.lock().unwrap(), vec![2]);
  }

  #[test]
  fn unknown_code_reaches_sink() {
    let sink = RecordingSink::default();
    let parts = notification(&encode_frame(0x8000, 3));
    let event = decode_event(&parts, &sink);
    assert_eq!(event, SocketEvent::new(EventKind::Unknown(0x8000), 3));
    assert_eq!(*sink.unknown.lock().unwrap(), vec![0x8000]);
  }

  #[test]
  fn encode_decode_round_trip_covers_full_code_space() {
    let values = [0u32, 1, 42, 300, 400, 500, u32::MAX];
    for code in 0..=u16::MAX {
      let value = values[code as usize % values.len()];
      let frame = encode_frame(code, value);
      let (raw, decoded_value) = decode_frame(&frame).expect("frame is exactly 6 bytes");
      assert_eq!(raw, code);
      assert_eq!(decoded_value, value);
      assert_eq!(EventKind::from_raw(raw), EventKind::from_raw(code));
    }
  }
}
