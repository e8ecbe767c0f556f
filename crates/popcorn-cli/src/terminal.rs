use indicatif::{ProgressBar, ProgressStyle};
use popcorn_core::DEFAULT_WINDOW_TITLE;
use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

pub fn is_interactive() -> bool {
    io::stdout().is_terminal() && io::stderr().is_terminal()
}

/// Mirrors the open movie in the terminal window title and puts the
/// default title back when dropped.
pub struct TitleGuard {
    enabled: bool,
    current: String,
}

impl TitleGuard {
    pub fn new() -> Self {
        let mut guard = Self {
            enabled: is_interactive(),
            current: String::new(),
        };
        guard.set(DEFAULT_WINDOW_TITLE);
        guard
    }

    pub fn set(&mut self, title: &str) {
        if !self.enabled || self.current == title {
            return;
        }
        // OSC 0: set icon name and window title
        print!("\x1b]0;{}\x07", title);
        let _ = io::stdout().flush();
        self.current = title.to_string();
    }

    pub fn reset(&mut self) {
        self.set(DEFAULT_WINDOW_TITLE);
    }
}

impl Drop for TitleGuard {
    fn drop(&mut self) {
        self.reset();
    }
}

pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible || !is_interactive() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `fut` with a spinner showing while it is pending
pub async fn with_spinner<F: Future>(message: &str, visible: bool, fut: F) -> F::Output {
    let spinner = spinner(message, visible);
    let out = fut.await;
    spinner.finish_and_clear();
    out
}
