use crate::evidence::evidence_log_odds;
use crate::matcher::significance_threshold;
use crate::models::{soft_plaintext, uniform_bytes};
use crate::partition::partition;
use serde::Serialize;

/// Suspected plaintext interval, end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Per-byte log-odds of "plausible plaintext character" versus
/// uniform random byte.
pub fn plaintext_evidence(buffer: &[u8]) -> Vec<f64> {
    buffer
        .iter()
        .map(|&b| evidence_log_odds(b, soft_plaintext(), uniform_bytes()))
        .collect()
}

/// Flag regions of the buffer likely to be readable plaintext, as happens
/// when key reuse leaves the XOR of two plaintexts directly visible.
pub fn find_plaintext_spans(buffer: &[u8]) -> Vec<Span> {
    find_plaintext_spans_with_threshold(buffer, significance_threshold(buffer.len()))
}

pub fn find_plaintext_spans_with_threshold(buffer: &[u8], threshold: f64) -> Vec<Span> {
    if buffer.len() <= 1 {
        return Vec::new();
    }
    partition(&plaintext_evidence(buffer), threshold, threshold)
        .into_iter()
        .map(|run| Span {
            start: run.start,
            end: run.end,
        })
        .collect()
}
