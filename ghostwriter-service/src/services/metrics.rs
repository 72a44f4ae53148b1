//! Service-specific metrics for ghostwriter-service.

use metrics::counter;

/// The editor failed and the expanded draft was returned instead.
pub fn record_polish_fallback() {
    counter!("ghostwriter_polish_fallbacks_total").increment(1);
}
