// src/events.rs

use bitflags::bitflags;

/// Declares the registry of known lifecycle event codes in one place.
///
/// Expands to the `EventKind` enum plus both directions of the code mapping
/// (`from_raw`, `raw_code`). Adding a new notification code is a single new
/// line in the table below; the decode logic never changes.
macro_rules! event_kinds {
  ( $( $(#[$meta:meta])* $name:ident = $code:literal ),+ $(,)? ) => {
    /// Semantic kind of a socket lifecycle notification.
    ///
    /// One variant per known wire code, plus two sentinels: `Unknown` for
    /// codes this build does not recognise (the raw code is preserved for
    /// diagnostics) and `Error` for notifications that could not be decoded
    /// at all. The meaning of [`SocketEvent::value`] depends entirely on the
    /// kind; see the per-variant documentation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[non_exhaustive]
    pub enum EventKind {
      /// The notification carried an event code with no known mapping.
      /// The raw 16-bit code is preserved so operators can detect protocol
      /// drift without the consumer crashing.
      Unknown(u16),
      /// Sentinel produced when a notification could not be decoded
      /// (wrong part count or truncated frame). Has no wire code; the
      /// accompanying value is always 0.
      Error,
      $( $(#[$meta])* $name, )+
    }

    impl EventKind {
      /// Maps a raw 16-bit event code to its semantic kind.
      ///
      /// Total function: codes absent from the registry map to
      /// [`EventKind::Unknown`] carrying the original code.
      pub fn from_raw(raw: u16) -> Self {
        match raw {
          $( $code => EventKind::$name, )+
          other => EventKind::Unknown(other),
        }
      }

      /// The wire code for this kind, if it has one.
      ///
      /// `None` only for [`EventKind::Error`], which exists purely on the
      /// consumer side and is never encoded into a notification frame.
      pub fn raw_code(&self) -> Option<u16> {
        match *self {
          $( EventKind::$name => Some($code), )+
          EventKind::Unknown(raw) => Some(raw),
          EventKind::Error => None,
        }
      }
    }
  };
}

event_kinds! {
  /// Transport-level connection established. Value is the OS file
  /// descriptor of the new connection; it is not guaranteed to remain
  /// valid beyond the moment of delivery.
  Connected = 0x0001,
  /// Synchronous connect failed, the attempt is delayed and will be
  /// retried. Value is 0.
  ConnectDelayed = 0x0002,
  /// Connect is being retried after a delay. Value is the next retry
  /// interval in milliseconds, recomputed per retry.
  ConnectRetried = 0x0004,
  /// Socket is listening on its endpoint. Value is the listener's file
  /// descriptor.
  Listening = 0x0008,
  /// Socket could not bind to its endpoint. Value is the native errno.
  BindFailed = 0x0010,
  /// Listener accepted a new connection. Value is the accepted file
  /// descriptor.
  Accepted = 0x0020,
  /// Listener failed to accept a connection. Value is the native errno.
  AcceptFailed = 0x0040,
  /// Connection was closed. Value is the file descriptor that was closed.
  Closed = 0x0080,
  /// Connection could not be closed cleanly. Value is the native errno.
  CloseFailed = 0x0100,
  /// Peer disconnected or the session was torn down. Value is the file
  /// descriptor of the broken connection.
  Disconnected = 0x0200,
  /// Monitoring on this socket ended. Value is 0. This is the last event
  /// a monitor channel delivers.
  MonitorStopped = 0x0400,
  /// ZMTP handshake failed before any detail was available. Value is the
  /// native errno.
  HandshakeFailedNoDetail = 0x0800,
  /// ZMTP handshake (including the security mechanism) completed. Value
  /// is 0.
  HandshakeSucceeded = 0x1000,
  /// ZMTP handshake failed with a protocol violation. Value is the ZMTP
  /// protocol error code.
  HandshakeFailedProtocol = 0x2000,
  /// ZMTP handshake failed during ZAP authentication. Value is the ZAP
  /// status code: one of 300, 400 or 500.
  HandshakeFailedAuth = 0x4000,
}

bitflags! {
  /// Bitmask selecting which lifecycle notification categories a transport
  /// emits on the monitor channel.
  ///
  /// Each flag's bit equals the corresponding event's wire code, so the mask
  /// check is a single AND against the encoded frame.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct EventMask: u16 {
    const CONNECTED = 0x0001;
    const CONNECT_DELAYED = 0x0002;
    const CONNECT_RETRIED = 0x0004;
    const LISTENING = 0x0008;
    const BIND_FAILED = 0x0010;
    const ACCEPTED = 0x0020;
    const ACCEPT_FAILED = 0x0040;
    const CLOSED = 0x0080;
    const CLOSE_FAILED = 0x0100;
    const DISCONNECTED = 0x0200;
    const MONITOR_STOPPED = 0x0400;
    const HANDSHAKE_FAILED_NO_DETAIL = 0x0800;
    const HANDSHAKE_SUCCEEDED = 0x1000;
    const HANDSHAKE_FAILED_PROTOCOL = 0x2000;
    const HANDSHAKE_FAILED_AUTH = 0x4000;
    /// Every category, including codes added by future transports.
    const ALL = 0xFFFF;
  }
}

impl EventMask {
  /// Whether an event with the given wire code passes this mask.
  pub fn accepts(&self, code: u16) -> bool {
    self.bits() & code != 0
  }
}

impl Default for EventMask {
  fn default() -> Self {
    EventMask::ALL
  }
}

/// One decoded lifecycle notification.
///
/// Immutable pair of kind and value; the value's meaning depends entirely on
/// the kind (see [`EventKind`]). Created once per decoded notification frame
/// and discarded after the observer consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketEvent {
  /// Semantic kind of the notification.
  pub kind: EventKind,
  /// Kind-dependent 32-bit value (fd, errno, interval, status code...).
  pub value: u32,
}

impl SocketEvent {
  /// Creates an event from its two fields.
  pub fn new(kind: EventKind, value: u32) -> Self {
    Self { kind, value }
  }
}
