//! Progress display for extraction commands.

use bridgefs_core::ProgressCallback;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use std::path::Path;
use std::time::Duration;

/// Terminal progress display implementing `ProgressCallback`.
///
/// Starts as a spinner. When the archive reports its entry count (ZIP does,
/// a TAR stream cannot) the spinner turns into a bar. Cleared on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
    has_length: bool,
}

impl CliProgress {
    /// Creates a progress display labelled with `message`.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        // Bytes written so far live in the prefix, shared by both styles.
        bar.set_prefix(humanize_bytes(0));
        bar.enable_steady_tick(Duration::from_millis(120));

        Self {
            bar,
            bytes_written: 0,
            has_length: false,
        }
    }

    /// Whether a progress display makes sense: stderr is a terminal.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }

    /// Bytes written so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner} {msg} {pos} entries ({prefix})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    // "Extracting [████████░░░░] 42/100 entries (15.2 MB, 12s)"
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} entries ({prefix}, {eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            write!(w, "{}", humanize_duration(state.eta())).unwrap_or(());
        })
        .progress_chars("█▓░")
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        if total > 0 && !self.has_length {
            self.bar.set_length(total as u64);
            self.bar.set_style(bar_style());
            self.bar.disable_steady_tick();
            self.has_length = true;
        }
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_prefix(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn humanize_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
