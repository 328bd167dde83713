//! In-memory event capture for logging assertions in tests.

use crate::sheetdb_core_types::schema::{FIELD_EVENT, FIELD_OP};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, fields rendered as strings.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    // numbers and bools fall through to here; their Debug matches Display
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Shared handle on every event captured in this process.
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// First event with the given `op` and `event` fields.
    pub fn find(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events().into_iter().find(|e| e.is(op, event))
    }

    /// Events with the given `op` whose `name` field equals `value`.
    pub fn matching(&self, op: &str, name: &str, value: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op) && e.field(name) == Some(value))
            .collect()
    }

    /// # Panics
    ///
    /// Panics if no event with this `op` and `event` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            self.find(op, event).is_some(),
            "no captured event op={} event={} among {}",
            op,
            event,
            self.events().len()
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (once per process).
///
/// ```
/// use sheetdb_core::logging_facility::test_capture::init_test_capture;
/// use sheetdb_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_op");
/// capture.assert_event_exists("doc_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            tracing_subscriber::registry()
                .with(CaptureLayer {
                    events: events.clone(),
                })
                .init();
            TestCapture { events }
        })
        .clone()
}
