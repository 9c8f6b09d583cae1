//! In-memory event capture for logging assertions in tests.
//!
//! Comparison entry points report their outcome as structured fields
//! (`diff_count`, `err_code`, ...). The capture layer flattens every event
//! into strings so tests can match on them without a formatter.

use crate::schema::{FIELD_COMPONENT, FIELD_DIFF_COUNT, FIELD_EVENT, FIELD_OP};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One captured event, fields rendered to text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Text of a field, if the event carried it
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// `diff_count` parsed back to a number
    pub fn diff_count(&self) -> Option<usize> {
        self.field(FIELD_DIFF_COUNT)?.parse().ok()
    }

    fn matches(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldFlattener(HashMap<String, String>);

impl FieldFlattener {
    fn put(&mut self, field: &Field, text: String) {
        self.0.insert(field.name().to_string(), text);
    }
}

impl Visit for FieldFlattener {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
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
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    buffer: Buffer,
}

impl TestCaptureLayer {
    /// A fresh layer and the handle reading its buffer
    pub fn new() -> (Self, TestCapture) {
        let buffer = Buffer::default();
        (
            Self {
                buffer: Arc::clone(&buffer),
            },
            TestCapture { buffer },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut flat = FieldFlattener::default();
        event.record(&mut flat);
        let fields = flat.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };

        if let Ok(mut events) = self.buffer.lock() {
            events.push(captured);
        }
    }
}

/// Read handle over captured events
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events for one operation and event name
    pub fn events_for(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.matches(op, event))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `diff_count` of every `end` event logged for `op`
    pub fn diff_counts(&self, op: &str) -> Vec<usize> {
        self.events_for(op, crate::schema::EVENT_END)
            .iter()
            .filter_map(CapturedEvent::diff_count)
            .collect()
    }

    /// # Panics
    ///
    /// Panics if no event with this operation and event name was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            !self.events_for(op, event).is_empty(),
            "no {}/{} event among {} captured",
            op,
            event,
            self.events().len()
        );
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.buffer.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber.
///
/// The first call installs it; later calls return a handle to the same
/// buffer. Tests in one binary share that buffer, so match on something
/// unique to the test.
///
/// ```
/// use valuediff_core::logging_facility::test_capture::init_test_capture;
/// use valuediff_core::{deep_diff_values, Value};
///
/// let capture = init_test_capture();
/// deep_diff_values(&Value::from(1_i64), &Value::from(2_i64));
/// capture.assert_event_exists("deep_diff_values", "end");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}
