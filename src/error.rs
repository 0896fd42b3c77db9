// src/error.rs

use thiserror::Error;

/// Structural failures of [`monitor::start`](crate::monitor::start).
///
/// Both variants are fatal to `start` and surfaced synchronously to the
/// caller; no retry is attempted. Per-notification decoding problems are
/// never errors: they degrade the single event instead (see `frame`).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MonitorError {
  /// The transport rejected the monitoring attach request (e.g. the socket
  /// is already monitored, or the mask is unsupported). Carries the native
  /// status code reported by the attach call.
  #[error("transport rejected monitor attach (status {code})")]
  AttachFailed { code: i32 },

  /// The receiving endpoint could not connect to the freshly attached
  /// notification address. Typically an internal address collision or
  /// transport-level resource exhaustion.
  #[error("monitor endpoint connect failed (status {code})")]
  ConnectFailed { code: i32 },
}
