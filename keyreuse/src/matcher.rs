use crate::error::Result;
use crate::matrix::EvidenceMatrix;
use crate::models::xor_plaintext;
use crate::partition::partition;
use serde::Serialize;
use std::collections::HashSet;

/// A diagonal segment of the evidence matrix judged significant: the byte
/// ranges starting at `offsets.0` and `offsets.1`, both `length` bytes
/// long, look like two plaintexts XORed under the same keystream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    pub offsets: (usize, usize),
    pub length: usize,
}

/// Evidence (in bits) a run must accumulate to count as significant for a
/// buffer of `len` bytes. Longer buffers collect more chance coincidences,
/// so the bar scales with the log of the length. Empirical, not a law;
/// callers may override it.
pub fn significance_threshold(len: usize) -> f64 {
    2.0 * (len as f64).log2() - 1.0
}

/// Scan a buffer for pairs of regions that look like parallel ciphers,
/// using the default significance threshold. Buffers shorter than two
/// bytes cannot align against themselves and yield no matches.
pub fn find_parallel_ciphers(buffer: &[u8]) -> Result<Vec<Match>> {
    if buffer.len() <= 1 {
        return Ok(Vec::new());
    }
    let threshold = significance_threshold(buffer.len());
    let matrix = EvidenceMatrix::build(buffer, xor_plaintext())?;
    Ok(scan_diagonals(&matrix, threshold, threshold))
}

/// Run the partitioner along every constant-offset diagonal of the matrix
/// and map qualifying runs back to (offset pair, length) matches.
pub fn scan_diagonals(matrix: &EvidenceMatrix, goal: f64, break_threshold: f64) -> Vec<Match> {
    let mut matches = Vec::new();
    // Offset 0 is the buffer against itself; every cell there is the
    // evidence for a zero byte, so the whole diagonal is skipped.
    for offset in 1..matrix.len() {
        let values = matrix.diagonal(offset);
        for run in partition(&values, goal, break_threshold) {
            matches.push(Match {
                offsets: (run.start + offset, run.start),
                length: run.end - run.start,
            });
        }
    }
    dedup_suffixes(matches)
}

/// Drop every match that is a plain suffix of another match: if
/// ((o1, o2), l) qualified, then ((o1+k, o2+k), l-k) is implied by it and
/// carries no extra information. Builds the exclusion set first and
/// filters once, so the result is independent of match order.
pub fn dedup_suffixes(matches: Vec<Match>) -> Vec<Match> {
    let present: HashSet<Match> = matches.iter().copied().collect();
    let mut redundant: HashSet<Match> = HashSet::new();
    for m in &matches {
        for k in 1..m.length {
            let candidate = Match {
                offsets: (m.offsets.0 + k, m.offsets.1 + k),
                length: m.length - k,
            };
            if present.contains(&candidate) {
                redundant.insert(candidate);
            }
        }
    }
    matches
        .into_iter()
        .filter(|m| !redundant.contains(m))
        .collect()
}
