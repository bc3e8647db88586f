//! Debounced search input
//!
//! Keystrokes update a live value; a background task republishes it as the
//! debounced value once the live value has been stable for the quiet period.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Live/debounced pair for one text input
///
/// Dropping the debouncer aborts its timer task, so a pending value is never
/// published after disposal.
#[derive(Debug)]
pub struct Debouncer {
    input: watch::Sender<String>,
    output: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// Starts the timer task; must be called from within a tokio runtime
    pub fn spawn(initial: impl Into<String>, quiet_period: Duration) -> Self {
        let initial = initial.into();
        let (input, input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);

        let task = tokio::spawn(Self::run(input_rx, output_tx, quiet_period));

        Self {
            input,
            output,
            task,
        }
    }

    async fn run(
        mut input_rx: watch::Receiver<String>,
        output_tx: watch::Sender<String>,
        quiet_period: Duration,
    ) {
        while input_rx.changed().await.is_ok() {
            // every further change restarts the quiet period
            loop {
                tokio::select! {
                    changed = input_rx.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    _ = tokio::time::sleep(quiet_period) => break,
                }
            }

            let settled = input_rx.borrow_and_update().clone();
            let published = output_tx.send_if_modified(|current| {
                if *current == settled {
                    return false;
                }
                *current = settled.clone();
                true
            });

            if published {
                tracing::debug!(term = %settled, "Search term settled");
            }
        }
    }

    /// Sets the live value, as a keystroke would
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        self.input.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Current live value
    pub fn live(&self) -> String {
        self.input.borrow().clone()
    }

    /// Current debounced value
    pub fn debounced(&self) -> String {
        self.output.borrow().clone()
    }

    /// Receiver notified each time the debounced value changes
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.output.clone()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
