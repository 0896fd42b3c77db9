// src/monitor/stream.rs

use crate::diag::DiagnosticSink;
use crate::events::SocketEvent;
use crate::frame;
use crate::transport::inproc::NotificationReceiver;

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

use futures::Stream;

/// Lazy, ordered sequence of decoded [`SocketEvent`]s.
///
/// Yields events in arrival order, one per multi-part notification received
/// on the monitor channel. The sequence is unbounded while the handle is
/// active and completes (yields `None`, never an error) once the handle is
/// closed or the publisher half goes away. Decoding problems never terminate
/// the sequence; they degrade the single event (see `frame::decode_event`).
/// Not restartable: a completed stream stays completed.
pub struct EventStream {
  // The receiver is !Unpin (its wait listener is pin-projected), so it stays
  // behind a pinned box; that keeps EventStream itself Unpin for consumers.
  receiver: Pin<Box<NotificationReceiver>>,
  closed: Arc<AtomicBool>,
  sink: Arc<dyn DiagnosticSink>,
}

impl EventStream {
  pub(crate) fn new(receiver: NotificationReceiver, closed: Arc<AtomicBool>, sink: Arc<dyn DiagnosticSink>) -> Self {
    Self {
      receiver: Box::pin(receiver),
      closed,
      sink,
    }
  }

  /// Receives the next decoded event, or `None` once the sequence has
  /// completed. Convenience over the [`Stream`] implementation.
  pub async fn recv(&mut self) -> Option<SocketEvent> {
    use futures::StreamExt;
    self.next().await
  }
}

impl Stream for EventStream {
  type Item = SocketEvent;

  fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
    let this = self.get_mut();
    // Checked on every poll so that close() takes effect at the next
    // suspension point, even for notifications already queued.
    if this.closed.load(Ordering::Acquire) {
      return Poll::Ready(None);
    }
    match this.receiver.as_mut().poll_next(cx) {
      Poll::Ready(Some(parts)) => {
        let event = frame::decode_event(&parts, this.sink.as_ref());
        Poll::Ready(Some(event))
      }
      Poll::Ready(None) => Poll::Ready(None),
      Poll::Pending => Poll::Pending,
    }
  }
}

impl std::fmt::Debug for EventStream {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EventStream")
      .field("closed", &self.closed.load(Ordering::Relaxed))
      .finish_non_exhaustive()
  }
}
