//! Terminal UI: user-facing notices, status lines and the request spinner.
//!
//! The [`Notifier`] trait is the "alert" surface of a search: the flow calls
//! it exactly once when a search is rejected or fails. [`TerminalNotifier`]
//! prints a colored line on stderr; [`RecordingNotifier`] keeps the messages
//! for inspection.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔍",
    }
}

/// Check if stderr is a terminal.
pub fn is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Format a styled status line.
pub fn format_status(status: Status, msg: &str) -> String {
    let icon = status_icon(status);
    if !is_terminal() {
        return format!("{} {}", icon, msg);
    }
    match status {
        Status::Success => format!("{} {}", icon.green().bold(), msg),
        Status::Error => format!("{} {}", icon.red().bold(), msg.red()),
        Status::Warning => format!("{} {}", icon.yellow().bold(), msg),
        Status::Info => format!("{} {}", icon.cyan().bold(), msg),
        Status::Search => format!("{} {}", icon.yellow(), msg),
    }
}

/// Print a styled status line on stderr.
pub fn print_status(status: Status, msg: &str) {
    eprintln!("{}", format_status(status, msg));
}

/// Print the summary line after a successful search.
pub fn print_search_header(query: &str, count: usize, duration: Duration) {
    if is_terminal() {
        eprintln!(
            "{} {} results for \"{}\" in {:.2}s",
            status_icon(Status::Search).yellow().bold(),
            count.to_string().green().bold(),
            query.cyan().bold(),
            duration.as_secs_f64()
        );
    } else {
        eprintln!(
            "{} {} results for \"{}\" in {:.2}s",
            status_icon(Status::Search),
            count,
            query,
            duration.as_secs_f64()
        );
    }
}

/// Truncate text to at most `max_width` characters, appending an ellipsis.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_width - 3).collect();
    format!("{}...", kept.trim_end())
}

/// Surface for blocking, user-facing notices.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints notices to stderr, pausing the request spinner while it does.
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier {
    spinner: Option<indicatif::ProgressBar>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep notices from being overdrawn by `spinner`
    pub fn with_spinner(spinner: &Spinner) -> Self {
        Self {
            spinner: Some(spinner.pb.clone()),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| print_status(Status::Error, message)),
            None => print_status(Status::Error, message),
        }
    }
}

/// Keeps every notice, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_string());
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Spinner shown while a request is in flight
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    pub fn new(msg: &str) -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that never draws
    pub fn hidden() -> Self {
        Self {
            pb: indicatif::ProgressBar::hidden(),
        }
    }

    /// Stop and erase the spinner
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Error), "✗");
        assert_eq!(status_icon(Status::Search), "🔍");
    }

    #[test]
    fn test_format_status_contains_message() {
        let line = format_status(Status::Error, "Enter a search term");
        assert!(line.contains("Enter a search term"));
        assert!(line.contains("✗"));
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Hello", 10), "Hello");
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
        assert_eq!(truncate_with_ellipsis("", 10), "");
        assert_eq!(truncate_with_ellipsis("Hello", 3), "...");
        assert_eq!(truncate_with_ellipsis("Éléments de géométrie", 9), "Élémen...");
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        assert!(notifier.is_empty());
        notifier.alert("first");
        notifier.alert("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }
}
