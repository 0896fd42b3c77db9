// src/socket/mod.rs

//! The seam between the monitor core and a monitored socket.
//!
//! The core needs exactly one thing from a target socket: the ability to
//! attach monitoring at a derived notification address. Transports implement
//! [`Monitorable`] and hold an [`EventEmitter`] as the publisher half of the
//! channel.

pub mod emitter;

pub use emitter::EventEmitter;

use crate::events::EventMask;

use async_trait::async_trait;

/// A socket whose lifecycle can be monitored.
///
/// Implementations bind the publisher half of the notification channel at
/// `endpoint` (normally via [`EventEmitter::bind`]) and from then on emit
/// their lifecycle notifications through it. Exactly one monitor may be
/// attached at a time: a second attach without an intervening close must
/// report a non-zero status (address in use) rather than silently replacing
/// the live monitor.
#[async_trait]
pub trait Monitorable: Send + Sync {
  /// Attaches monitoring at `endpoint`, emitting only the notification
  /// categories selected by `mask`.
  ///
  /// Returns `0` on success or a native status code on failure (see
  /// [`transport::inproc::status`](crate::transport::inproc::status)).
  async fn attach_monitor(&self, endpoint: &str, mask: EventMask) -> i32;
}
