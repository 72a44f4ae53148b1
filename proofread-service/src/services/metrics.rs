//! Service-specific metrics for proofread-service.

use metrics::counter;

/// Outcome of one spellcheck request: `known`, `suggested` or `no_candidates`.
pub fn record_spellcheck(outcome: &'static str) {
    counter!("spellcheck_requests_total", "outcome" => outcome).increment(1);
}
