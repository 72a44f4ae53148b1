//! Trace propagation for outbound HTTP calls.
//!
//! Calls to model endpoints and from the gateway to the services carry the
//! W3C `traceparent`/`tracestate` of the current span and, when known, the
//! caller's `x-request-id`, so one browser request can be followed across
//! every hop.
//!
//! See: https://www.w3.org/TR/trace-context/

use opentelemetry::trace::TraceContextExt;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headers describing the current span, empty when no exported span is active.
pub fn current_trace_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    let context = Span::current().context();
    let span_ref = context.span();
    let span = span_ref.span_context();
    if !span.is_valid() {
        return headers;
    }

    // version 00: version-trace_id-span_id-flags
    let traceparent = format!(
        "00-{}-{}-{:02x}",
        span.trace_id(),
        span.span_id(),
        span.trace_flags().to_u8()
    );
    if let Ok(value) = HeaderValue::from_str(&traceparent) {
        headers.insert(TRACEPARENT_HEADER, value);
    }

    let state = span.trace_state().header();
    if !state.is_empty()
        && let Ok(value) = HeaderValue::from_str(&state)
    {
        headers.insert(TRACESTATE_HEADER, value);
    }

    headers
}

/// Trace headers plus `x-request-id` when one is given and non-empty.
pub fn outbound_headers(request_id: Option<&str>) -> HeaderMap {
    let mut headers = current_trace_headers();

    if let Some(id) = request_id.filter(|id| !id.is_empty())
        && let Ok(value) = HeaderValue::from_str(id)
    {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    headers
}

/// The `x-request-id` of an incoming request.
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Attach propagation headers to a `reqwest` request.
pub trait PropagateTrace {
    fn propagate_trace(self, request_id: Option<&str>) -> Self;
}

impl PropagateTrace for reqwest::RequestBuilder {
    fn propagate_trace(self, request_id: Option<&str>) -> Self {
        self.headers(outbound_headers(request_id))
    }
}
