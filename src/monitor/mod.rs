// src/monitor/mod.rs

//! Monitor channel lifecycle: attach, consume, tear down.

mod stream;

pub use stream::EventStream;

use crate::context::Context;
use crate::diag::{DiagnosticSink, TracingSink};
use crate::error::MonitorError;
use crate::events::EventMask;
use crate::socket::Monitorable;
use crate::transport::inproc::{status, NotificationReceiver};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Attaches a monitor channel to `socket` and returns the owning handle.
///
/// Derives a unique process-local notification address from the context,
/// asks the socket to attach monitoring at it with `mask`, then connects the
/// receiving endpoint. Fails with [`MonitorError::AttachFailed`] when the
/// transport rejects the attach (non-zero status, e.g. the socket is already
/// monitored) and with [`MonitorError::ConnectFailed`] when the receiving
/// endpoint cannot connect; both are synchronous failures the caller must
/// handle before any event can be observed.
pub async fn start<S>(context: &Context, socket: &S, mask: EventMask) -> Result<Monitor, MonitorError>
where
  S: Monitorable + ?Sized,
{
  let endpoint = context.inner().next_monitor_endpoint();

  let rc = socket.attach_monitor(&endpoint, mask).await;
  if rc != status::OK {
    // The socket may have bound the address before failing; roll that back
    // so the address cannot leak a dangling channel.
    context.inner().unbind_notification(&endpoint);
    tracing::warn!(monitor_endpoint = %endpoint, code = rc, "Monitor attach rejected by socket");
    return Err(MonitorError::AttachFailed { code: rc });
  }

  let receiver = match context.inner().connect_notification(&endpoint) {
    Ok(rx) => rx,
    Err(code) => {
      context.inner().unbind_notification(&endpoint);
      tracing::warn!(monitor_endpoint = %endpoint, code, "Monitor endpoint connect failed");
      return Err(MonitorError::ConnectFailed { code });
    }
  };

  tracing::debug!(monitor_endpoint = %endpoint, mask = ?mask, "Monitor attached");
  Ok(Monitor {
    endpoint,
    receiver,
    closed: Arc::new(AtomicBool::new(false)),
  })
}

/// Exclusive ownership of one attached monitor channel.
///
/// Exactly one `Monitor` exists per monitored socket at a time; re-monitoring
/// requires closing the previous handle first (the transport allows only one
/// active monitor endpoint per socket). The handle's lifecycle is
/// `Active -> Stopped` via [`close`](Monitor::close); a stopped handle never
/// becomes active again — a fresh [`start`] produces a new handle and a new
/// event sequence.
#[derive(Debug)]
pub struct Monitor {
  endpoint: String,
  receiver: NotificationReceiver,
  closed: Arc<AtomicBool>,
}

impl Monitor {
  /// The derived notification address this monitor is connected to.
  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Whether [`close`](Monitor::close) has been called.
  pub fn is_closed(&self) -> bool {
    self.closed.load(Ordering::Acquire)
  }

  /// The decoded event sequence, reporting diagnostics through the default
  /// `tracing` sink.
  ///
  /// Exactly one logical consumer should drain the sequence; draining from
  /// several streams on the same handle is unsupported and yields undefined
  /// interleaving.
  pub fn events(&self) -> EventStream {
    self.events_with_sink(Arc::new(TracingSink))
  }

  /// The decoded event sequence with an injected diagnostic sink.
  pub fn events_with_sink(&self, sink: Arc<dyn DiagnosticSink>) -> EventStream {
    EventStream::new(self.receiver.clone(), Arc::clone(&self.closed), sink)
  }

  /// Stops monitoring by closing the receiving endpoint.
  ///
  /// Idempotent: a second call is a no-op, not an error. Any event stream
  /// obtained from this handle completes at its next suspension point; the
  /// target socket's publisher half observes the closed channel and stops
  /// delivering. No explicit detach is sent to the socket — detach-on-close
  /// is transport-guaranteed behavior.
  pub fn close(&self) {
    if self.closed.swap(true, Ordering::AcqRel) {
      return;
    }
    self.receiver.close();
    tracing::debug!(monitor_endpoint = %self.endpoint, "Monitor closed");
  }
}

impl Drop for Monitor {
  fn drop(&mut self) {
    self.close();
  }
}
