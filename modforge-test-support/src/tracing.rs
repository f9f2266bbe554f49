//! Recording layer for asserting on spans and events in tests.

use std::{
    collections::HashMap,
    fmt::{self, Write as _},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span,
};
use tracing_subscriber::{Layer, layer::Context, prelude::*, registry::LookupSpan};

/// Structured fields keyed by field name, values rendered as strings.
pub type Fields = HashMap<String, String>;

/// A span that has closed, with every field it recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanRecord {
    /// Span name from its metadata, e.g. `topology.generate`.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: Fields,
}

/// An emitted event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    /// Level of the event.
    pub level: Level,
    /// Target, usually the emitting module path.
    pub target: String,
    /// Fields of the event; the formatted message is stored under `message`.
    pub fields: Fields,
}

impl EventRecord {
    /// The formatted message of the event, if it had one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

#[derive(Debug, Default)]
struct Recorded {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

/// Layer capturing closed spans and events for later inspection.
///
/// Clones share the same storage, so a clone can be installed in a
/// subscriber while the original is kept for assertions.
///
/// # Examples
/// ```
/// use modforge_test_support::tracing::RecordingLayer;
///
/// let layer = RecordingLayer::default();
/// assert!(layer.spans().is_empty());
/// assert!(layer.events().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingLayer {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingLayer {
    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.lock().spans.clone()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.lock().events.clone()
    }

    /// Events at exactly `level`.
    #[must_use]
    pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
        self.lock()
            .events
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        // A panicking test thread must not hide what was recorded before it.
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs `f` with a fresh [`RecordingLayer`] installed as the thread's
/// default subscriber and returns its result with the layer.
///
/// Only spans and events emitted on the calling thread are captured.
///
/// # Examples
/// ```
/// use modforge_test_support::tracing::capture;
///
/// let (value, layer) = capture(|| {
///     tracing::info!(answer = 42, "computed");
///     42
/// });
/// assert_eq!(value, 42);
/// let events = layer.events();
/// assert_eq!(events[0].message(), Some("computed"));
/// assert_eq!(events[0].fields.get("answer").map(String::as_str), Some("42"));
/// ```
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, layer)
}

struct PendingSpan {
    name: &'static str,
    fields: Fields,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut pending = PendingSpan {
            name: attrs.metadata().name(),
            fields: Fields::new(),
        };
        attrs.record(&mut FieldVisitor(&mut pending.fields));
        span.extensions_mut().insert(pending);
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut FieldVisitor(&mut pending.fields));
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let Some(pending) = ctx
            .span(&id)
            .and_then(|span| span.extensions_mut().remove::<PendingSpan>())
        else {
            return;
        };
        self.lock().spans.push(SpanRecord {
            name: pending.name.to_owned(),
            fields: pending.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut fields = Fields::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.lock().events.push(EventRecord {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        });
    }
}

struct FieldVisitor<'a>(&'a mut Fields);

impl FieldVisitor<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bytes(&mut self, field: &Field, value: &[u8]) {
        let mut hex = String::with_capacity(value.len() * 2);
        for byte in value {
            let _ = write!(hex, "{byte:02x}");
        }
        self.put(field, hex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing::{info_span, warn};

    #[test]
    fn closed_spans_keep_late_fields() {
        let ((), layer) = capture(|| {
            let span = info_span!("work", items = tracing::field::Empty);
            span.record("items", 3_u64);
            drop(span);
        });
        let spans = layer.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "work");
        assert_eq!(spans[0].fields.get("items").map(String::as_str), Some("3"));
    }

    #[test]
    fn events_are_filtered_by_level() {
        let ((), layer) = capture(|| {
            tracing::debug!("quiet");
            warn!(code = "X", "loud");
        });
        let warnings = layer.events_at(Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message(), Some("loud"));
        assert_eq!(warnings[0].fields.get("code").map(String::as_str), Some("X"));
    }
}
