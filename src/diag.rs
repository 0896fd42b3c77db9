// src/diag.rs

use crate::message::Msg;

/// Receives non-fatal decoding diagnostics from an event stream.
///
/// Decoding problems never fail the stream (see `frame::decode_event`); they
/// degrade the single event and report here instead. The sink is injected per
/// stream so the core has no implicit global output dependency; hooks default
/// to no-ops so implementors only override what they care about.
pub trait DiagnosticSink: Send + Sync {
  /// A notification carried an event code with no registry mapping.
  /// The event was delivered as `EventKind::Unknown(raw)`.
  fn unknown_event_code(&self, raw: u16) {
    let _ = raw;
  }

  /// A notification did not have the expected two-part shape or its first
  /// part was not a 6-byte frame. The event was delivered as the
  /// `(Error, 0)` sentinel; the raw parts are handed over so nothing is
  /// lost for debugging.
  fn malformed_notification(&self, parts: &[Msg]) {
    let _ = parts;
  }
}

/// Default sink: reports diagnostics through `tracing` at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
  fn unknown_event_code(&self, raw: u16) {
    tracing::warn!(raw_code = raw, "Unknown monitor event code");
  }

  fn malformed_notification(&self, parts: &[Msg]) {
    tracing::warn!(
      part_count = parts.len(),
      first_part_len = parts.first().map_or(0, |p| p.size()),
      "Malformed monitor notification, downgraded to Error event"
    );
  }
}
