use serde::Serialize;

/// Half-open index interval over a score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub start: usize,
    /// End exclusive.
    pub end: usize,
}

/// Extract maximal runs of accumulated positive evidence from `scores`.
///
/// A run qualifies once the positive evidence collected in it reaches
/// `goal`. It is forcibly closed once the negative evidence accumulated
/// since the last positive score reaches `break_threshold`, or at the end
/// of the sequence; only in the end-of-sequence case does the interval
/// extend one past the last positive score.
///
/// Known quirk, kept on purpose: the negative accumulator is only reset by
/// the next strictly-positive score, never by a run closing, so leftover
/// bad evidence from a closed run carries into the next candidate and can
/// close it immediately.
pub fn partition(scores: &[f64], goal: f64, break_threshold: f64) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut positive = 0.0; // evidence collected in the current candidate
    let mut negative = 0.0; // magnitude of negatives since the last positive
    let mut last_positive = 0;
    let mut start = 0;

    for (index, &score) in scores.iter().enumerate() {
        if score > 0.0 {
            negative = 0.0;
            last_positive = index;
            positive += score;
        } else {
            negative += -score;
        }

        let at_end = index + 1 == scores.len();
        if negative >= break_threshold || at_end {
            let mut end = last_positive;
            if at_end && negative < break_threshold {
                // Cut off by the end of the sequence: keep the final
                // positive score inside the interval.
                end += 1;
            }
            if positive >= goal {
                runs.push(Run { start, end });
            }
            start = index + 1;
            positive = 0.0;
        }
    }
    runs
}
