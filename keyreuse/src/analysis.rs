use crate::error::Result;
use crate::matcher::{scan_diagonals, significance_threshold, Match};
use crate::matrix::EvidenceMatrix;
use crate::models::xor_plaintext;
use crate::plaintext::{find_plaintext_spans_with_threshold, Span};

/// Complete single-pass analysis of one buffer.
///
/// The evidence matrix is retained so callers can hand it to the heat-map
/// renderer without recomputing it.
#[derive(Debug)]
pub struct Analysis {
    /// Goal and break threshold used for both detectors, in bits.
    pub threshold: f64,
    pub matches: Vec<Match>,
    pub plaintext_spans: Vec<Span>,
    pub matrix: EvidenceMatrix,
}

/// Analyze a buffer with the default significance threshold. Buffers of
/// length 0 or 1 produce empty results (and a threshold of 0, since the
/// scaling formula is undefined there).
pub fn analyze(buffer: &[u8]) -> Result<Analysis> {
    let threshold = if buffer.len() <= 1 {
        0.0
    } else {
        significance_threshold(buffer.len())
    };
    analyze_with_threshold(buffer, threshold)
}

/// Analyze a buffer with an explicit significance threshold.
pub fn analyze_with_threshold(buffer: &[u8], threshold: f64) -> Result<Analysis> {
    let matrix = EvidenceMatrix::build(buffer, xor_plaintext())?;
    let matches = if buffer.len() <= 1 {
        Vec::new()
    } else {
        scan_diagonals(&matrix, threshold, threshold)
    };
    let plaintext_spans = find_plaintext_spans_with_threshold(buffer, threshold);
    Ok(Analysis {
        threshold,
        matches,
        plaintext_spans,
        matrix,
    })
}
