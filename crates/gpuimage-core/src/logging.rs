//! Diagnostics setup.
//!
//! Events are emitted with `tracing` and routed to whatever output layer the
//! embedding crate installs through [`init`]. The five `tracing` levels map
//! onto the five Android log priorities via [`Priority`].

use std::fmt::{self, Write as _};

use once_cell::sync::OnceCell;
use tracing::field::{Field, Visit};
use tracing::{warn, Event, Level};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LogConfig;

/// Tag all diagnostics are filed under.
pub const LOG_TAG: &str = "libgpuimage";

static INIT: OnceCell<()> = OnceCell::new();

/// Android log priority (`android_LogPriority`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i32)]
pub enum Priority {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
}

impl From<Level> for Priority {
    fn from(level: Level) -> Self {
        match level {
            Level::TRACE => Priority::Verbose,
            Level::DEBUG => Priority::Debug,
            Level::INFO => Priority::Info,
            Level::WARN => Priority::Warn,
            Level::ERROR => Priority::Error,
        }
    }
}

/// Install a global subscriber writing through the layer `make_layer`
/// builds, filtered by [`LogConfig::from_env`].
///
/// Only the first call has an effect. If another subscriber was installed
/// globally first, that one stays. An unparsable filter falls back to
/// `info` and is reported once through the new subscriber.
pub fn init<L>(make_layer: impl FnOnce(&LogConfig) -> L)
where
    L: Layer<Layered<EnvFilter, Registry>> + Send + Sync + 'static,
{
    INIT.get_or_init(|| {
        let config = LogConfig::from_env();
        let (filter, rejected) = parse_filter(&config.filter);
        let layer = make_layer(&config);
        let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
        if let Some(reason) = rejected {
            warn_rejected_filter(&config.filter, &reason);
        }
    });
}

const FALLBACK_FILTER: &str = "info";

/// Build the `EnvFilter` for `directives`, or the `info` fallback together
/// with the reason `directives` was rejected.
fn parse_filter(directives: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(FALLBACK_FILTER), Some(err.to_string())),
    }
}

fn warn_rejected_filter(directives: &str, reason: &str) {
    warn!(
        filter = directives,
        fallback = FALLBACK_FILTER,
        "ignoring invalid log filter: {reason}"
    );
}

/// Render an event's message followed by its other fields as `key=value`.
pub fn format_event(event: &Event<'_>) -> String {
    let mut visitor = EventText::default();
    event.record(&mut visitor);
    visitor.finish()
}

#[derive(Default)]
struct EventText {
    message: String,
    fields: String,
}

impl EventText {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for EventText {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
            return;
        }
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={value:?}", field.name());
    }
}
