//! Interrupt handling for the interactive commands

use colored::Colorize;
use tokio::sync::mpsc;

/// Why the process was asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Ctrl+C / SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
}

/// Delivers SIGINT and SIGTERM as channel messages so they can be selected
/// alongside the event loop
pub struct InterruptSignal {
    receiver: mpsc::Receiver<Interrupt>,
}

impl InterruptSignal {
    /// Start listening. Must be called from within the runtime.
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        let tx_int = tx.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("{} Interrupted", "↓".cyan());
                if tx_int.send(Interrupt::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate())?;
            tokio::spawn(async move {
                sigterm.recv().await;
                let _ = tx.send(Interrupt::Terminate).await;
            });
        }

        Ok(Self { receiver: rx })
    }

    /// Wait for the next interrupt
    pub async fn recv(&mut self) -> Option<Interrupt> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listener_starts_inside_runtime() {
        let signal = InterruptSignal::new();
        assert!(signal.is_ok());
    }

    #[test]
    fn interrupt_kinds_differ() {
        assert_ne!(Interrupt::Interrupt, Interrupt::Terminate);
    }
}
