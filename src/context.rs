// src/context.rs

use crate::events::EventMask;
use crate::monitor::{self, Monitor};
use crate::socket::Monitorable;
use crate::error::MonitorError;
use crate::transport::inproc::{status, NotificationReceiver, NotificationSender};

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Internal state shared by all handles to one context.
#[derive(Debug)]
pub(crate) struct ContextInner {
  /// Monotonic source for monitor endpoint suffixes. A plain counter is
  /// collision-free within the process, which an identity hash would not
  /// strictly guarantee.
  next_monitor_token: AtomicU64,

  /// Registry of bound notification endpoints whose receiving half has not
  /// been claimed yet. Key is the full endpoint address.
  pending_channels: Mutex<HashMap<String, NotificationReceiver>>,
}

impl ContextInner {
  fn new() -> Self {
    Self {
      next_monitor_token: AtomicU64::new(1),
      pending_channels: Mutex::new(HashMap::new()),
    }
  }

  /// Derives the next unique process-local monitor endpoint address.
  pub(crate) fn next_monitor_endpoint(&self) -> String {
    // Relaxed ordering is sufficient for a simple counter
    let token = self.next_monitor_token.fetch_add(1, Ordering::Relaxed);
    format!("inproc://monitor.{:08x}", token)
  }

  /// Creates a notification channel and registers its receiving half under
  /// `endpoint`. Returns the sending half for the publisher, or
  /// `ADDR_IN_USE` if the endpoint is already bound.
  pub(crate) fn bind_notification(&self, endpoint: &str, capacity: usize) -> Result<NotificationSender, i32> {
    let mut registry = self.pending_channels.lock();
    if registry.contains_key(endpoint) {
      tracing::warn!(monitor_endpoint = %endpoint, "Notification endpoint already bound");
      return Err(status::ADDR_IN_USE);
    }
    let (tx, rx) = async_channel::bounded(capacity.max(1));
    registry.insert(endpoint.to_string(), rx);
    tracing::debug!(monitor_endpoint = %endpoint, capacity, "Notification endpoint bound");
    Ok(tx)
  }

  /// Claims the receiving half registered under `endpoint`. Each binding can
  /// be claimed exactly once; a missing or already-claimed endpoint reports
  /// `CONN_REFUSED`.
  pub(crate) fn connect_notification(&self, endpoint: &str) -> Result<NotificationReceiver, i32> {
    match self.pending_channels.lock().remove(endpoint) {
      Some(rx) => {
        tracing::debug!(monitor_endpoint = %endpoint, "Notification endpoint connected");
        Ok(rx)
      }
      None => {
        tracing::warn!(monitor_endpoint = %endpoint, "Notification endpoint not bound or already claimed");
        Err(status::CONN_REFUSED)
      }
    }
  }

  /// Discards an unclaimed receiving half, if one is still registered.
  /// Used to roll back a partially failed monitor start.
  pub(crate) fn unbind_notification(&self, endpoint: &str) {
    if self.pending_channels.lock().remove(endpoint).is_some() {
      tracing::debug!(monitor_endpoint = %endpoint, "Notification endpoint unbound");
    }
  }
}

/// A handle to the process-local monitoring context.
///
/// The context owns the notification-endpoint registry and the token source
/// used to derive unique monitor addresses. Handles are cheap to clone and
/// thread-safe; all clones share the same inner state.
#[derive(Clone)]
pub struct Context {
  inner: Arc<ContextInner>,
}

impl Context {
  /// Creates a new, independent context.
  pub fn new() -> Self {
    tracing::debug!("Creating new zmonitor Context");
    Self {
      inner: Arc::new(ContextInner::new()),
    }
  }

  /// Starts monitoring `socket`, delivering the notification categories
  /// selected by `mask`. Convenience wrapper over [`monitor::start`].
  pub async fn monitor<S>(&self, socket: &S, mask: EventMask) -> Result<Monitor, MonitorError>
  where
    S: Monitorable + ?Sized,
  {
    monitor::start(self, socket, mask).await
  }

  pub(crate) fn inner(&self) -> &Arc<ContextInner> {
    &self.inner
  }
}

impl Default for Context {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Context {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Context").finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn monitor_endpoints_are_unique() {
    let ctx = Context::new();
    let a = ctx.inner().next_monitor_endpoint();
    let b = ctx.inner().next_monitor_endpoint();
    assert_ne!(a, b);
    assert!(a.starts_with("inproc://monitor."));
  }

  #[test]
  fn duplicate_bind_reports_addr_in_use() {
    let ctx = Context::new();
    let _tx = ctx.inner().bind_notification("inproc://monitor.x", 4).unwrap();
    let err = ctx.inner().bind_notification("inproc://monitor.x", 4).unwrap_err();
    assert_eq!(err, status::ADDR_IN_USE);
  }

  #[test]
  fn connect_claims_binding_exactly_once() {
    let ctx = Context::new();
    let _tx = ctx.inner().bind_notification("inproc://monitor.y", 4).unwrap();
    assert!(ctx.inner().connect_notification("inproc://monitor.y").is_ok());
    let err = ctx.inner().connect_notification("inproc://monitor.y").unwrap_err();
    assert_eq!(err, status::CONN_REFUSED);
  }
}
