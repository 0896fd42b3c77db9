// src/socket/emitter.rs

use crate::context::Context;
use crate::events::{EventMask, SocketEvent};
use crate::frame;
use crate::message::{Msg, MsgFlags};
use crate::transport::inproc::{NotificationSender, DEFAULT_MONITOR_CAPACITY};

use std::sync::atomic::{AtomicBool, Ordering};

/// Publisher half of a monitor channel.
///
/// A `Monitorable` implementation creates one of these during
/// `attach_monitor` and routes its lifecycle notifications through it. The
/// emitter filters by the attach-time [`EventMask`], encodes each event into
/// the two-part wire form and delivers it without blocking: monitoring must
/// never stall the socket, so a full channel drops the event and a closed
/// channel (observer went away) marks the emitter stopped.
#[derive(Debug)]
pub struct EventEmitter {
  sender: NotificationSender,
  mask: EventMask,
  endpoint: String,
  stopped: AtomicBool,
}

impl EventEmitter {
  /// Binds the publisher half of a notification channel at `endpoint` with
  /// the default channel capacity. Returns a native status code on failure.
  pub fn bind(context: &Context, endpoint: &str, mask: EventMask) -> Result<Self, i32> {
    Self::bind_with_capacity(context, endpoint, mask, DEFAULT_MONITOR_CAPACITY)
  }

  /// Like [`bind`](Self::bind) with an explicit channel capacity.
  pub fn bind_with_capacity(context: &Context, endpoint: &str, mask: EventMask, capacity: usize) -> Result<Self, i32> {
    let sender = context.inner().bind_notification(endpoint, capacity)?;
    Ok(Self {
      sender,
      mask,
      endpoint: endpoint.to_string(),
      stopped: AtomicBool::new(false),
    })
  }

  /// The notification address this emitter is bound to.
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Whether delivery has stopped (observer closed its end, or
  /// [`stop`](Self::stop) was called).
  pub fn is_stopped(&self) -> bool {
    self.stopped.load(Ordering::Acquire) || self.sender.is_closed()
  }

  /// Emits one lifecycle event concerning `source_endpoint` (the address of
  /// the connection or listener the event is about).
  ///
  /// Returns `true` if the notification was handed to the channel. Events
  /// filtered out by the mask, events past a full channel, and events after
  /// the observer closed its end all return `false`; none of them are
  /// errors.
  pub fn emit(&self, event: SocketEvent, source_endpoint: &str) -> bool {
    if self.stopped.load(Ordering::Acquire) {
      return false;
    }
    let Some(code) = event.kind.raw_code() else {
      // The Error sentinel is consumer-side only and has no wire form.
      return false;
    };
    if !self.mask.accepts(code) {
      return false;
    }
    self.deliver(code, event.value, source_endpoint)
  }

  /// Emits a raw `(code, value)` pair, bypassing the registry. Lets a
  /// transport surface codes newer than this build's `EventKind` table.
  pub fn emit_raw(&self, code: u16, value: u32, source_endpoint: &str) -> bool {
    if self.stopped.load(Ordering::Acquire) || !self.mask.accepts(code) {
      return false;
    }
    self.deliver(code, value, source_endpoint)
  }

  fn deliver(&self, code: u16, value: u32, source_endpoint: &str) -> bool {
    let mut event_part = Msg::from_vec(frame::encode_frame(code, value).to_vec());
    event_part.set_flags(MsgFlags::MORE);
    let endpoint_part = Msg::from_vec(source_endpoint.as_bytes().to_vec());

    match self.sender.try_send(vec![event_part, endpoint_part]) {
      Ok(()) => true,
      Err(async_channel::TrySendError::Full(_)) => {
        tracing::warn!(
          monitor_endpoint = %self.endpoint,
          event_code = code,
          "Monitor channel full, dropping event"
        );
        false
      }
      Err(async_channel::TrySendError::Closed(_)) => {
        // Observer closed its end; delivery stops for good.
        self.stopped.store(true, Ordering::Release);
        false
      }
    }
  }

  /// Stops monitoring: emits a final `MonitorStopped` notification (mask
  /// permitting) and closes the channel. Idempotent.
  pub fn stop(&self) {
    if self.stopped.swap(true, Ordering::AcqRel) {
      return;
    }
    let code = EventMask::MONITOR_STOPPED.bits();
    if self.mask.accepts(code) {
      let mut event_part = Msg::from_vec(frame::encode_frame(code, 0).to_vec());
      event_part.set_flags(MsgFlags::MORE);
      let _ = self
        .sender
        .try_send(vec![event_part, Msg::from_vec(self.endpoint.as_bytes().to_vec())]);
    }
    self.sender.close();
    tracing::debug!(monitor_endpoint = %self.endpoint, "Event emitter stopped");
  }
}

impl Drop for EventEmitter {
  fn drop(&mut self) {
    self.stop();
  }
}
