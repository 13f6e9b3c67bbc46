//! Loading indicators
//!
//! A spinner stands in for the loading state of a list or form while a
//! request is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Create a spinner for a request in flight
///
/// When `visible` is false (JSON output, or stderr is not a terminal) the
/// spinner is hidden and every call on it is a no-op.
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible || !console::user_attended_stderr() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Run `future` behind a spinner, clearing it when the future completes
pub async fn while_loading<F>(message: &str, visible: bool, future: F) -> F::Output
where
    F: Future,
{
    let pb = spinner(message, visible);
    let output = future.await;
    pb.finish_and_clear();
    output
}
