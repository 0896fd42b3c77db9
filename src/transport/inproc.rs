// src/transport/inproc.rs

//! In-process notification channel.
//!
//! A monitor channel is a private, process-local point-to-point path between
//! the monitored socket (publisher half) and the observer (receiving half).
//! Each channel item is one fully assembled multi-part notification, so the
//! receiving side never has to reassemble parts or reorder anything.

use crate::message::Msg;

/// Sending half of a notification channel, held by the monitored socket's
/// event emitter.
pub type NotificationSender = async_channel::Sender<Vec<Msg>>;

/// Receiving half of a notification channel, owned by the monitor handle.
pub type NotificationReceiver = async_channel::Receiver<Vec<Msg>>;

/// Default capacity of a monitor channel. Delivery is non-blocking for the
/// publisher; a slow observer loses events past this depth rather than
/// stalling the socket.
pub const DEFAULT_MONITOR_CAPACITY: usize = 100;

/// Native-style status codes carried through attach/connect results, mirroring
/// the errno values a C transport would report.
pub mod status {
  /// Operation succeeded.
  pub const OK: i32 = 0;
  /// The notification address is already bound (the socket already has an
  /// active monitor, or the derived address collided).
  pub const ADDR_IN_USE: i32 = 98;
  /// No publisher is bound at the notification address.
  pub const CONN_REFUSED: i32 = 111;
}
