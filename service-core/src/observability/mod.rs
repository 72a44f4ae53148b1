pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::init_tracing;
pub use metrics::{get_metrics, init_metrics, record_inference};
pub use trace_context::{
    PropagateTrace, REQUEST_ID_HEADER, TRACEPARENT_HEADER, current_trace_headers,
    extract_request_id, outbound_headers,
};
