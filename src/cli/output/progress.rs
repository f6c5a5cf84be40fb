//! Progress bar shown while issues are mapped.
//!
//! The bar implements [`ProgressSink`] so the migration service can drive
//! it without knowing about the terminal. Log events share stderr with the
//! bar through [`ProgressLogWriter`], which clears the bar, writes the
//! event and redraws it.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::models::SourceIssue;
use crate::services::ProgressSink;

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Widest issue title shown next to the bar.
const MAX_TITLE_LEN: usize = 48;

/// Create the mapping progress bar.
///
/// The length is unknown until the issue list has been fetched; see
/// [`ProgressSink::fetched`]. A hidden bar is returned when `hidden` is set.
pub fn create_progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden());
    }

    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
        pb.set_style(style.progress_chars(PROGRESS_CHARS));
    }
    pb.set_message("Fetching issues...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

impl ProgressSink for ProgressBar {
    fn fetched(&self, total: usize) {
        self.set_length(total as u64);
        self.set_position(0);
    }

    fn examining(&self, issue: &SourceIssue) {
        self.set_message(truncate(&issue.title, MAX_TITLE_LEN));
    }

    fn mapped(&self, _project_key: &str) {
        self.inc(1);
    }
}

/// Log writer that suspends the progress bar while an event is written.
///
/// Each event is buffered whole and emitted inside
/// [`ProgressBar::suspend`], so log lines never land in the middle of a bar
/// redraw.
#[derive(Clone)]
pub struct ProgressLogWriter {
    bar: ProgressBar,
    target: Arc<Mutex<dyn Write + Send>>,
}

impl ProgressLogWriter {
    /// Write events to stderr around `bar`.
    pub fn new(bar: ProgressBar) -> Self {
        Self::with_target(bar, Arc::new(Mutex::new(io::stderr())))
    }

    /// Write events to `target` around `bar`.
    pub fn with_target(bar: ProgressBar, target: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { bar, target }
    }
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            bar: self.bar.clone(),
            target: Arc::clone(&self.target),
            buf: Vec::new(),
        }
    }
}

/// Buffers one log event and flushes it around the bar on drop.
pub struct EventWriter {
    bar: ProgressBar,
    target: Arc<Mutex<dyn Write + Send>>,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        self.bar.suspend(|| {
            if let Ok(mut target) = self.target.lock() {
                let _ = target.write_all(&self.buf);
                let _ = target.flush();
            }
        });
    }
}

/// Truncate to `max_chars` characters, appending "..." if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str) -> SourceIssue {
        SourceIssue {
            id: 1,
            iid: 1,
            project_id: 1,
            title: title.to_string(),
            description: String::new(),
            state: "opened".to_string(),
            labels: vec![],
            web_url: String::new(),
        }
    }

    #[test]
    fn test_sink_tracks_mapped_issues() {
        let pb = create_progress_bar(true);
        pb.fetched(3);
        assert_eq!(pb.length(), Some(3));

        pb.examining(&issue("First"));
        pb.mapped("ENG");
        pb.mapped("WEB");
        assert_eq!(pb.position(), 2);
        pb.finish();
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_events_are_written_whole_around_the_bar() {
        let pb = create_progress_bar(true);
        pb.fetched(2);
        let buf = SharedBuf::default();
        let writer = ProgressLogWriter::with_target(pb.clone(), Arc::new(Mutex::new(buf.clone())));

        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Examining '{}'", "First issue");
            pb.mapped("ENG");
            tracing::info!("Examining '{}'", "Second issue");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Examining 'First issue'"));
        assert!(lines[1].ends_with("Examining 'Second issue'"));
        assert_eq!(pb.position(), 1);
        pb.finish();
    }

    #[test]
    fn test_empty_event_writes_nothing() {
        let buf = SharedBuf::default();
        let writer =
            ProgressLogWriter::with_target(create_progress_bar(true), Arc::new(Mutex::new(buf.clone())));
        drop(writer.make_writer());
        assert!(buf.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }
}
