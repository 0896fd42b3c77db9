// tests/common.rs
#![allow(dead_code)] // Not every helper is used by every test binary

use zmonitor::socket::EventEmitter;
use zmonitor::transport::inproc::status;
use zmonitor::{Context, EventKind, EventMask, Monitorable, SocketEvent};

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static TRACING_INIT: Once = Once::new();

// Setup function to initialize tracing once per test binary.
fn setup_tracing() {
  TRACING_INIT.call_once(|| {
    let default_filter = "zmonitor=trace,warn";
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_test_writer()
      .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing subscriber");
  });
}

/// Creates a context with tracing initialized.
pub fn test_context() -> Context {
  setup_tracing();
  Context::new()
}

/// Minimal monitorable socket: binds an `EventEmitter` on attach and lets the
/// test drive lifecycle notifications by hand.
pub struct TestSocket {
  context: Context,
  emitter: Mutex<Option<Arc<EventEmitter>>>,
}

impl TestSocket {
  pub fn new(context: &Context) -> Self {
    Self {
      context: context.clone(),
      emitter: Mutex::new(None),
    }
  }

  /// Emits one lifecycle event, as the transport would. Returns whether the
  /// notification was handed to the channel.
  pub fn emit(&self, event: SocketEvent, source_endpoint: &str) -> bool {
    match self.emitter.lock().unwrap().as_ref() {
      Some(emitter) => emitter.emit(event, source_endpoint),
      None => false,
    }
  }

  /// Emits a raw `(code, value)` pair, bypassing the registry.
  pub fn emit_raw(&self, code: u16, value: u32, source_endpoint: &str) -> bool {
    match self.emitter.lock().unwrap().as_ref() {
      Some(emitter) => emitter.emit_raw(code, value, source_endpoint),
      None => false,
    }
  }

  /// Simulates closing the socket: monitoring stops and the channel emits a
  /// final `MonitorStopped`.
  pub fn close(&self) {
    if let Some(emitter) = self.emitter.lock().unwrap().take() {
      emitter.stop();
    }
  }
}

#[async_trait]
impl Monitorable for TestSocket {
  async fn attach_monitor(&self, endpoint: &str, mask: EventMask) -> i32 {
    let mut guard = self.emitter.lock().unwrap();
    if let Some(existing) = guard.as_ref() {
      if !existing.is_stopped() {
        // Only one live monitor per socket.
        return status::ADDR_IN_USE;
      }
    }
    match EventEmitter::bind(&self.context, endpoint, mask) {
      Ok(emitter) => {
        *guard = Some(Arc::new(emitter));
        status::OK
      }
      Err(code) => code,
    }
  }
}

/// A socket whose attach always fails with the given status. Used to
/// exercise the `AttachFailed` path.
pub struct RejectingSocket(pub i32);

#[async_trait]
impl Monitorable for RejectingSocket {
  async fn attach_monitor(&self, _endpoint: &str, _mask: EventMask) -> i32 {
    self.0
  }
}

/// A socket that claims attach success without binding anything, leaving the
/// receiving endpoint with nothing to connect to. Used to exercise the
/// `ConnectFailed` path.
pub struct GhostSocket;

#[async_trait]
impl Monitorable for GhostSocket {
  async fn attach_monitor(&self, _endpoint: &str, _mask: EventMask) -> i32 {
    status::OK
  }
}

/// Awaits the next event from `stream` or panics after `timeout`.
pub async fn recv_timeout(stream: &mut zmonitor::EventStream, timeout: Duration) -> Option<SocketEvent> {
  tokio::time::timeout(timeout, stream.recv())
    .await
    .expect("timed out waiting for monitor event")
}

/// Shorthand for an event whose value carries a file descriptor or errno.
pub fn event(kind: EventKind, value: u32) -> SocketEvent {
  SocketEvent::new(kind, value)
}
