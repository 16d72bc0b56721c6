//! Notification infrastructure module

mod noop;
mod notify_rust;

pub use noop::NoOpNotifier;
pub use self::notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

/// Desktop notifier when enabled, otherwise one that drops every notice
pub fn create_notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(NotifyRustNotifier)
    } else {
        Box::new(NoOpNotifier)
    }
}
