//! Notifier used when desktop notifications are disabled

use async_trait::async_trait;

use crate::application::dialog::Notice;
use crate::application::ports::{NotificationError, Notifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn show(&self, _notice: &Notice) -> Result<(), NotificationError> {
        Ok(())
    }
}
