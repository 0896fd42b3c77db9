//! Process-local transport plumbing for the notification channel.

pub mod inproc;

pub use inproc::{NotificationReceiver, NotificationSender, DEFAULT_MONITOR_CAPACITY};
