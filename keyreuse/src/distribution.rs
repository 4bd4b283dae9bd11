use rand::Rng;
use std::collections::BTreeMap;

/// Discrete probability model over byte symbols.
///
/// Probabilities are stored exactly as given: constructors like
/// `linear_combination` do not renormalize, and nothing checks that the
/// values sum to 1. Looking up an absent symbol returns 0 rather than
/// failing. Iteration order is part of the contract: symbols are always
/// visited in ascending byte order, which is what `sample` relies on for
/// its inverse-CDF draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: BTreeMap<u8, f64>,
}

impl Distribution {
    pub fn new(probs: BTreeMap<u8, f64>) -> Self {
        Self { probs }
    }

    /// Equal probability for every listed symbol. An empty symbol list
    /// yields an empty distribution rather than dividing by zero.
    pub fn uniform(symbols: impl IntoIterator<Item = u8>) -> Self {
        let symbols: Vec<u8> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Self {
                probs: BTreeMap::new(),
            };
        }
        let p = 1.0 / symbols.len() as f64;
        Self {
            probs: symbols.into_iter().map(|s| (s, p)).collect(),
        }
    }

    /// Stored probability of `symbol`, or 0 if absent.
    pub fn probability(&self, symbol: u8) -> f64 {
        self.probs.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Overwrite (or insert) one symbol's probability.
    pub fn set(&mut self, symbol: u8, probability: f64) {
        self.probs.insert(symbol, probability);
    }

    /// Symbols with stored probabilities, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        self.probs.keys().copied()
    }

    /// Shannon entropy in bits.
    pub fn entropy(&self) -> f64 {
        self.probs
            .values()
            .filter(|&&p| p > 0.0)
            .map(|&p| -p * p.log2())
            .sum()
    }

    /// Total code length of `sequence` under this model, in bits. Any
    /// symbol the model assigns zero probability makes the sequence
    /// infinitely surprising.
    pub fn surprise(&self, sequence: &[u8]) -> f64 {
        let mut total = 0.0;
        for &symbol in sequence {
            let p = self.probability(symbol);
            if p == 0.0 {
                return f64::INFINITY;
            }
            total -= p.log2();
        }
        total
    }

    /// Product of per-symbol probabilities, assuming independence. The
    /// empty sequence has probability 1.
    pub fn probability_of_sequence(&self, sequence: &[u8]) -> f64 {
        sequence.iter().map(|&s| self.probability(s)).product()
    }

    /// Probability that two independent draws coincide.
    pub fn index_of_coincidence(&self) -> f64 {
        self.probs.values().map(|p| p * p).sum()
    }

    /// Draw `count` independent symbols by inverse-CDF sampling over the
    /// ascending symbol order. Does not mutate the model.
    pub fn sample<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<u8> {
        (0..count).map(|_| self.sample_one(rng)).collect()
    }

    fn sample_one<R: Rng>(&self, rng: &mut R) -> u8 {
        let target: f64 = rng.gen();
        let mut accumulated = 0.0;
        for (&symbol, &p) in &self.probs {
            accumulated += p;
            if accumulated >= target {
                return symbol;
            }
        }
        // Total mass short of 1.0 is permitted; fall back to the last symbol.
        self.probs.keys().next_back().copied().unwrap_or(0)
    }

    /// First moment, treating symbols as numeric values.
    pub fn mean(&self) -> f64 {
        self.probs.iter().map(|(&s, &p)| s as f64 * p).sum()
    }

    /// Second central moment, treating symbols as numeric values.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.probs
            .iter()
            .map(|(&s, &p)| p * (s as f64 - mean).powi(2))
            .sum()
    }

    pub fn stdev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Weighted sum of distributions. Weights are taken literally and need
    /// not sum to 1; the result is not renormalized.
    pub fn linear_combination(parts: &[(&Distribution, f64)]) -> Self {
        let mut probs: BTreeMap<u8, f64> = BTreeMap::new();
        for (dist, weight) in parts {
            for (&symbol, &p) in &dist.probs {
                *probs.entry(symbol).or_insert(0.0) += p * weight;
            }
        }
        Self { probs }
    }

    /// Distribution of `combine(x1, .., xk)` where each `xi` is drawn
    /// independently from its own distribution.
    pub fn pushforward(operands: &[&Distribution], combine: impl Fn(&[u8]) -> u8) -> Self {
        let mut probs: BTreeMap<u8, f64> = BTreeMap::new();
        let supports: Vec<Vec<(u8, f64)>> = operands
            .iter()
            .map(|d| d.probs.iter().map(|(&s, &p)| (s, p)).collect())
            .collect();
        let mut case = vec![0u8; operands.len()];
        visit_cases(&supports, 0, 1.0, &mut case, &mut |case, p| {
            *probs.entry(combine(case)).or_insert(0.0) += p;
        });
        Self { probs }
    }
}

fn visit_cases<F: FnMut(&[u8], f64)>(
    supports: &[Vec<(u8, f64)>],
    depth: usize,
    prob: f64,
    case: &mut Vec<u8>,
    visit: &mut F,
) {
    if depth == supports.len() {
        visit(case, prob);
        return;
    }
    for &(symbol, p) in &supports[depth] {
        case[depth] = symbol;
        visit_cases(supports, depth + 1, prob * p, case, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_assigns_equal_probability_and_log_entropy() {
        let dist = Distribution::uniform(0..16u8);
        for symbol in 0..16u8 {
            assert!((dist.probability(symbol) - 1.0 / 16.0).abs() < 1e-12);
        }
        assert!((dist.entropy() - 4.0).abs() < 1e-9);
        assert_eq!(dist.probability(200), 0.0);
    }

    #[test]
    fn linear_combination_takes_weights_literally() {
        let a = Distribution::uniform([b'x']);
        let b = Distribution::uniform([b'x', b'y']);
        let combined = Distribution::linear_combination(&[(&a, 2.0), (&b, 3.0)]);
        assert!((combined.probability(b'x') - (2.0 + 1.5)).abs() < 1e-12);
        assert!((combined.probability(b'y') - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_sequence_has_probability_one() {
        let dist = Distribution::uniform([b'a']);
        assert_eq!(dist.probability_of_sequence(&[]), 1.0);
    }

    #[test]
    fn surprise_diverges_on_unseen_symbol() {
        let dist = Distribution::uniform([b'a', b'b']);
        assert_eq!(dist.surprise(b"abz"), f64::INFINITY);
        assert!((dist.surprise(b"ab") - 2.0).abs() < 1e-9);
    }

    #[test]
    fn moments_of_two_point_distribution() {
        let mut probs = BTreeMap::new();
        probs.insert(0u8, 0.5);
        probs.insert(10u8, 0.5);
        let dist = Distribution::new(probs);
        assert!((dist.mean() - 5.0).abs() < 1e-12);
        assert!((dist.variance() - 25.0).abs() < 1e-12);
        assert!((dist.stdev() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn index_of_coincidence_of_uniform_is_inverse_size() {
        let dist = Distribution::uniform(0..8u8);
        assert!((dist.index_of_coincidence() - 1.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn sampling_is_deterministic_under_a_fixed_seed() {
        let dist = Distribution::uniform(b"abcd".iter().copied());
        let first = dist.sample(64, &mut StdRng::seed_from_u64(7));
        let second = dist.sample(64, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(first.iter().all(|s| b"abcd".contains(s)));
    }

    #[test]
    fn pushforward_builds_xor_distribution() {
        let coin = Distribution::uniform([0u8, 1u8]);
        let xored = Distribution::pushforward(&[&coin, &coin], |case| case[0] ^ case[1]);
        assert!((xored.probability(0) - 0.5).abs() < 1e-12);
        assert!((xored.probability(1) - 0.5).abs() < 1e-12);

        let point = Distribution::uniform([5u8]);
        let shifted = Distribution::pushforward(&[&point, &coin], |case| case[0] ^ case[1]);
        assert!((shifted.probability(5) - 0.5).abs() < 1e-12);
        assert!((shifted.probability(4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn set_overwrites_a_single_symbol() {
        let mut dist = Distribution::uniform([b'a', b'b']);
        dist.set(b'a', 0.9);
        assert_eq!(dist.probability(b'a'), 0.9);
        assert_eq!(dist.probability(b'b'), 0.5);
    }
}
