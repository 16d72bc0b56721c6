//! Port for surfacing dialog notices outside the terminal

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dialog::Notice;

#[derive(Debug, Clone, Error)]
#[error("Notice not shown: {0}")]
pub struct NotificationError(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show one notice. Callers only log failures.
    async fn show(&self, notice: &Notice) -> Result<(), NotificationError>;
}
