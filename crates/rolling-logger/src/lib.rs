//! Rolling Logger
//!
//! A `tracing` layer that keeps the most recent records in a circular buffer
//! and mirrors every record to the browser console.
//!
//! The buffer is what the settings page reads to show recent activity, so the
//! dashboard never needs a log file or a log endpoint.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// Default number of records kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static GLOBAL_BUFFER: OnceLock<Arc<RingBuffer>> = OnceLock::new();

/// One captured log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub at: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.at.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Fixed-capacity record buffer; the oldest record is dropped when full.
#[derive(Debug)]
pub struct RingBuffer {
    records: Mutex<VecDeque<LogRecord>>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, record: LogRecord) {
        // A poisoned lock only means a panic happened mid-push; the data is still usable.
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Records in arrival order (oldest first)
    pub fn snapshot(&self) -> Vec<LogRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

/// Collects the `message` field plus any structured fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Layer writing into a [`RingBuffer`] and the console
pub struct RollingLayer {
    buffer: Arc<RingBuffer>,
    app_name: String,
    max_level: Level,
    mirror_to_console: bool,
}

impl RollingLayer {
    pub fn new(buffer: Arc<RingBuffer>, app_name: impl Into<String>) -> Self {
        Self {
            buffer,
            app_name: app_name.into(),
            max_level: Level::DEBUG,
            mirror_to_console: true,
        }
    }

    /// Drop events more verbose than `level`
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    pub fn without_console(mut self) -> Self {
        self.mirror_to_console = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > self.max_level {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            at: Utc::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: format!("{}{}", visitor.message, visitor.fields),
        };

        if self.mirror_to_console {
            write_console(&self.app_name, &record);
        }
        self.buffer.push(record);
    }
}

#[cfg(target_arch = "wasm32")]
fn write_console(app_name: &str, record: &LogRecord) {
    let line = format!("[{}] {}", app_name, record);
    match record.level {
        Level::ERROR => web_sys::console::error_1(&line.into()),
        Level::WARN => web_sys::console::warn_1(&line.into()),
        _ => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(app_name: &str, record: &LogRecord) {
    eprintln!("[{}] {}", app_name, record);
}

/// Install the rolling layer as the global subscriber.
///
/// Calling it twice returns the error from `set_global_default`; the first
/// buffer stays installed.
pub fn init_logger(
    app_name: &str,
    capacity: usize,
    max_level: Level,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let buffer = GLOBAL_BUFFER
        .get_or_init(|| Arc::new(RingBuffer::new(capacity)))
        .clone();
    let subscriber = Registry::default()
        .with(RollingLayer::new(buffer, app_name).with_max_level(max_level));
    tracing::subscriber::set_global_default(subscriber)
}

/// Recent records from the global buffer (empty before `init_logger`)
pub fn recent() -> Vec<LogRecord> {
    GLOBAL_BUFFER
        .get()
        .map(|buffer| buffer.snapshot())
        .unwrap_or_default()
}

/// Clear the global buffer
pub fn clear() {
    if let Some(buffer) = GLOBAL_BUFFER.get() {
        buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture<F: FnOnce()>(capacity: usize, max_level: Level, f: F) -> Arc<RingBuffer> {
        let buffer = Arc::new(RingBuffer::new(capacity));
        let layer = RollingLayer::new(buffer.clone(), "test")
            .with_max_level(max_level)
            .without_console();
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        buffer
    }

    #[test]
    fn test_records_message_and_fields() {
        let buffer = capture(10, Level::DEBUG, || {
            tracing::info!(ticket = "T1", "status changed");
        });

        let records = buffer.snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::INFO);
        assert_eq!(records[0].message, "status changed ticket=T1");
    }

    #[test]
    fn test_oldest_record_dropped_when_full() {
        let buffer = capture(3, Level::DEBUG, || {
            for i in 0..5 {
                tracing::info!("event {}", i);
            }
        });

        let messages: Vec<String> = buffer.snapshot().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_level_filter() {
        let buffer = capture(10, Level::WARN, || {
            tracing::debug!("noise");
            tracing::info!("still noise");
            tracing::warn!("rolled back");
            tracing::error!("failed");
        });

        let levels: Vec<Level> = buffer.snapshot().into_iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![Level::WARN, Level::ERROR]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let buffer = RingBuffer::new(0);
        buffer.push(LogRecord {
            at: Utc::now(),
            level: Level::INFO,
            target: "t".into(),
            message: "a".into(),
        });
        assert_eq!(buffer.len(), 1);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
