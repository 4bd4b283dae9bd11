//! Shared character-frequency models.
//!
//! All models are process-wide immutable singletons, built once on first
//! use and shared by reference afterwards. They are read-only after
//! construction, so handing them to any future parallel scan is safe.

use crate::distribution::Distribution;
use std::sync::OnceLock;

/// Characters that appear in plaintext without being printable:
/// NUL, CR, LF and space.
const MISC_CHARS: &[u8] = b"\x00\x0d\x0a\x20";

const PUNCTUATION: &[u8] = br##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Relative letter frequencies in English text.
const ENGLISH_LETTER_FREQUENCIES: [(u8, f64); 26] = [
    (b'e', 0.13000),
    (b't', 0.09056),
    (b'a', 0.08167),
    (b'o', 0.07507),
    (b'i', 0.06966),
    (b'n', 0.06749),
    (b's', 0.06327),
    (b'h', 0.06094),
    (b'r', 0.05987),
    (b'd', 0.04253),
    (b'l', 0.04025),
    (b'c', 0.02782),
    (b'u', 0.02758),
    (b'm', 0.02406),
    (b'w', 0.02360),
    (b'f', 0.02228),
    (b'g', 0.02015),
    (b'y', 0.01974),
    (b'p', 0.01929),
    (b'b', 0.01492),
    (b'v', 0.00978),
    (b'k', 0.00772),
    (b'j', 0.00153),
    (b'x', 0.00150),
    (b'q', 0.00095),
    (b'z', 0.00074),
];

/// English lowercase letter frequencies.
pub fn english_lowercase() -> &'static Distribution {
    static DIST: OnceLock<Distribution> = OnceLock::new();
    DIST.get_or_init(|| Distribution::new(ENGLISH_LETTER_FREQUENCIES.iter().copied().collect()))
}

/// The same frequencies shifted to uppercase letters.
pub fn english_uppercase() -> &'static Distribution {
    static DIST: OnceLock<Distribution> = OnceLock::new();
    DIST.get_or_init(|| {
        Distribution::new(
            ENGLISH_LETTER_FREQUENCIES
                .iter()
                .map(|&(s, p)| (s.to_ascii_uppercase(), p))
                .collect(),
        )
    })
}

/// Uniform distribution over all 256 byte values: the "this is noise"
/// null model every evidence score is measured against.
pub fn uniform_bytes() -> &'static Distribution {
    static DIST: OnceLock<Distribution> = OnceLock::new();
    DIST.get_or_init(|| Distribution::uniform(0..=255u8))
}

/// Soft model of a plausible plaintext character: a weighted mixture of
/// lowercase and uppercase English letters, digits, punctuation, and a
/// few control/whitespace characters.
pub fn soft_plaintext() -> &'static Distribution {
    static DIST: OnceLock<Distribution> = OnceLock::new();
    DIST.get_or_init(|| {
        let digits = Distribution::uniform(b'0'..=b'9');
        let punctuation = Distribution::uniform(PUNCTUATION.iter().copied());
        let misc = Distribution::uniform(MISC_CHARS.iter().copied());
        Distribution::linear_combination(&[
            (english_lowercase(), 0.25),
            (english_uppercase(), 0.25),
            (&digits, 0.2),
            (&punctuation, 0.2),
            (&misc, 0.1),
        ])
    })
}

/// Distribution of the XOR of two independent soft-plaintext characters,
/// which is what the ciphertext XOR of two streams encrypted under the
/// same keystream looks like.
pub fn xor_plaintext() -> &'static Distribution {
    static DIST: OnceLock<Distribution> = OnceLock::new();
    DIST.get_or_init(|| {
        let soft = soft_plaintext();
        Distribution::pushforward(&[soft, soft], |case| case[0] ^ case[1])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_bytes_covers_the_full_alphabet() {
        let dist = uniform_bytes();
        assert_eq!(dist.symbols().count(), 256);
        assert!((dist.entropy() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn soft_plaintext_mass_is_close_to_one() {
        // The letter table is empirical and sums to roughly 1.003, so the
        // mixture inherits that slack.
        let total: f64 = soft_plaintext()
            .symbols()
            .map(|s| soft_plaintext().probability(s))
            .sum();
        assert!((total - 1.0).abs() < 0.01);
    }

    #[test]
    fn soft_plaintext_prefers_common_letters() {
        let dist = soft_plaintext();
        assert!(dist.probability(b'e') > dist.probability(b'z'));
        assert!(dist.probability(b' ') > 0.0);
        assert!(dist.probability(0x80) == 0.0);
    }

    #[test]
    fn xor_plaintext_peaks_at_zero() {
        let dist = xor_plaintext();
        let p_zero = dist.probability(0);
        // Two identical plaintext characters XOR to zero, so zero must be
        // far likelier than under the uniform null.
        assert!(p_zero > 1.0 / 256.0);
        assert!((p_zero - soft_plaintext().index_of_coincidence()).abs() < 1e-9);
    }
}
