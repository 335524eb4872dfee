//! Compact JSON rendering of finished spans.
//!
//! One [`SpanRecord`] is written per span, one JSON object per line:
//!
//! ```json
//! {"service":"moviescorn","name":"watchlist_add","trace_id":"…","span_id":"…",
//!  "start":"2024-05-01T12:00:00.000000Z","duration_us":42,
//!  "attributes":{"movie_id":3},"events":[],"status":"unset"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::Value;
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::time::SystemTime;

/// Serializable view of one finished span.
#[derive(Debug, Serialize)]
pub struct SpanRecord<'a> {
    service: &'a str,
    name: &'a str,
    trace_id: String,
    span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_span_id: Option<String>,
    start: String,
    duration_us: u64,
    attributes: Map<String, JsonValue>,
    events: Vec<EventRecord<'a>>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    name: &'a str,
    at: String,
    attributes: Map<String, JsonValue>,
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attributes(pairs: &[opentelemetry::KeyValue]) -> Map<String, JsonValue> {
    pairs
        .iter()
        .map(|kv| (kv.key.as_str().to_string(), attribute_value(&kv.value)))
        .collect()
}

/// Maps an attribute value to its natural JSON type.
pub fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) => JsonValue::String(s.as_str().to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

impl<'a> SpanRecord<'a> {
    pub fn new(service: &'a str, span: &'a SpanData) -> Self {
        let duration = span.end_time.duration_since(span.start_time).unwrap_or_default();
        let (status, error) = match &span.status {
            Status::Unset => ("unset", None),
            Status::Ok => ("ok", None),
            Status::Error { description } => ("error", Some(description.to_string())),
        };

        Self {
            service,
            name: &span.name,
            trace_id: span.span_context.trace_id().to_string(),
            span_id: span.span_context.span_id().to_string(),
            parent_span_id: (span.parent_span_id != SpanId::INVALID).then(|| span.parent_span_id.to_string()),
            start: timestamp(span.start_time),
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: &event.name,
                    at: timestamp(event.timestamp),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            status,
            error,
        }
    }

    /// Renders the record as a single JSON line.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
