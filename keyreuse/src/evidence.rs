use crate::distribution::Distribution;

/// Stand-in for "impossible under the hypothesis" (log odds of minus
/// infinity). Kept finite so downstream accumulation stays well-defined.
pub const MIN_EVIDENCE: f64 = -1.0e9;

/// Log-odds, in bits, that `symbol` originates in `hypothesis` rather
/// than in `baseline`. Saturates to [`MIN_EVIDENCE`] when the hypothesis
/// assigns the symbol zero probability.
///
/// `baseline` must assign every byte of the alphabet a nonzero
/// probability; the uniform 256-symbol model is the intended null. This is
/// the only place raw probabilities feed a logarithm, so the zero guard
/// lives here.
pub fn evidence_log_odds(symbol: u8, hypothesis: &Distribution, baseline: &Distribution) -> f64 {
    let p_hypothesis = hypothesis.probability(symbol);
    if p_hypothesis == 0.0 {
        return MIN_EVIDENCE;
    }
    let p_baseline = baseline.probability(symbol);
    debug_assert!(p_baseline > 0.0, "baseline must cover the full alphabet");
    p_hypothesis.log2() - p_baseline.log2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::uniform_bytes;

    #[test]
    fn zero_probability_saturates_to_sentinel() {
        let hypothesis = Distribution::uniform([b'a']);
        assert_eq!(
            evidence_log_odds(b'b', &hypothesis, uniform_bytes()),
            MIN_EVIDENCE
        );
    }

    #[test]
    fn certain_symbol_scores_the_full_alphabet_width() {
        let hypothesis = Distribution::uniform([b'a']);
        // p=1 vs p=1/256 is exactly 8 bits of evidence.
        let bits = evidence_log_odds(b'a', &hypothesis, uniform_bytes());
        assert!((bits - 8.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_hypothesis_carries_no_evidence() {
        let bits = evidence_log_odds(42, uniform_bytes(), uniform_bytes());
        assert!(bits.abs() < 1e-9);
    }
}
