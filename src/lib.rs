// src/lib.rs

//! zmonitor - typed, asynchronous lifecycle-event monitoring for
//! ZeroMQ-style sockets.
//!
//! A monitor channel is a private, process-local notification path attached
//! to one socket. The transport writes each lifecycle transition (connect,
//! bind, handshake, disconnect, ...) onto it as a two-part binary message;
//! this crate decodes those messages into [`SocketEvent`]s and exposes them
//! as an ordered async stream with explicit, idempotent teardown.
//!
//! The observer side attaches with [`monitor::start`] (or
//! [`Context::monitor`]) and drains [`EventStream`]; the publisher side is
//! the [`EventEmitter`] a [`Monitorable`] transport holds after attach.

/// Defines the `Context`, which owns the notification-endpoint registry.
pub mod context;
/// Injectable sink for non-fatal decode diagnostics.
pub mod diag;
/// Defines custom error types used throughout the library.
pub mod error;
/// The event-code registry: `EventKind`, `EventMask`, `SocketEvent`.
pub mod events;
/// Binary layout of the 6-byte notification frame.
pub mod frame;
/// Contains types related to raw message representation (`Msg`, `MsgFlags`).
pub mod message;
/// Monitor handle lifecycle and the decoded event stream.
pub mod monitor;
/// The target-socket seam and the publisher half of the channel.
pub mod socket;
/// Process-local notification channel plumbing.
pub mod transport;

// Re-export core types for user convenience, making them accessible directly
// from the crate root (e.g., `zmonitor::SocketEvent`).
pub use context::Context;
pub use diag::{DiagnosticSink, TracingSink};
pub use error::MonitorError;
pub use events::{EventKind, EventMask, SocketEvent};
pub use message::{Msg, MsgFlags};
pub use monitor::{start, EventStream, Monitor};
pub use socket::{EventEmitter, Monitorable};

/// Major version number of the zmonitor library.
const VERSION_MAJOR: i32 = 0;
/// Minor version number of the zmonitor library.
const VERSION_MINOR: i32 = 1;
/// Patch version number of the zmonitor library.
const VERSION_PATCH: i32 = 0;

/// Returns the library version as a tuple (major, minor, patch).
pub fn version() -> (i32, i32, i32) {
  (VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}
