//! XOR cipher utilities: buffer combination, repeating-key encryption,
//! the single-byte key breaker, coincidence counting, block padding, and
//! hex/base64 conversions.

use crate::distribution::Distribution;
use crate::error::{KeyReuseError, Result};
use crate::models::english_lowercase;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// XOR two buffers position-wise, truncating to the shorter one.
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// XOR `data` with `key` repeated cyclically. An empty key leaves the
/// data unchanged.
pub fn repeating_key_xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .enumerate()
        .map(|(i, &b)| b ^ key[i % key.len()])
        .collect()
}

/// Outcome of the single-byte XOR key search.
#[derive(Debug, Clone)]
pub struct SingleByteBreak {
    pub key: u8,
    pub plaintext: Vec<u8>,
    /// Code length of the lowercased decryption under the scoring model.
    pub surprise_bits: f64,
}

/// Try all 256 single-byte keys against English letter frequencies.
///
/// Text is lowercased before scoring, so a key and its case-flipping twin
/// (key ^ 0x20) score identically; the smaller key wins ties.
pub fn break_single_byte_xor(ciphertext: &[u8]) -> SingleByteBreak {
    break_single_byte_xor_with(ciphertext, english_lowercase())
}

/// Single-byte key search against a caller-chosen character model: the
/// key whose lowercased decryption is least surprising wins.
pub fn break_single_byte_xor_with(ciphertext: &[u8], model: &Distribution) -> SingleByteBreak {
    let mut best = decrypt_candidate(ciphertext, 0, model);
    for key in 1..=255u8 {
        let candidate = decrypt_candidate(ciphertext, key, model);
        if candidate.surprise_bits < best.surprise_bits {
            best = candidate;
        }
    }
    best
}

fn decrypt_candidate(ciphertext: &[u8], key: u8, model: &Distribution) -> SingleByteBreak {
    let plaintext = repeating_key_xor(ciphertext, &[key]);
    let lowered: Vec<u8> = plaintext.iter().map(|b| b.to_ascii_lowercase()).collect();
    let surprise_bits = model.surprise(&lowered);
    SingleByteBreak {
        key,
        plaintext,
        surprise_bits,
    }
}

/// Fraction of position pairs (i, j) holding equal bytes, self-pairs
/// included. Roughly 0.0039 for uniform random bytes and 0.065 for
/// monocase English text.
pub fn buffer_index_of_coincidence(buffer: &[u8]) -> f64 {
    if buffer.is_empty() {
        return 0.0;
    }
    let counts = byte_counts(buffer);
    let matches: u64 = counts.iter().map(|&c| c * c).sum();
    matches as f64 / (buffer.len() * buffer.len()) as f64
}

/// Probability that a byte drawn from `a` equals a byte drawn from `b`.
/// High values suggest the two buffers share a character distribution.
pub fn mutual_index_of_coincidence(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let counts_a = byte_counts(a);
    let counts_b = byte_counts(b);
    let matches: u64 = counts_a
        .iter()
        .zip(counts_b.iter())
        .map(|(&x, &y)| x * y)
        .sum();
    matches as f64 / (a.len() * b.len()) as f64
}

fn byte_counts(buffer: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &b in buffer {
        counts[b as usize] += 1;
    }
    counts
}

/// Append padding up to the next multiple of `modulus`, always adding at
/// least one byte; each pad byte encodes the pad length.
pub fn pad(buffer: &[u8], modulus: usize) -> Result<Vec<u8>> {
    if modulus == 0 || modulus > 255 {
        return Err(KeyReuseError::InvalidModulus(modulus));
    }
    let mut pad_length = (modulus - buffer.len() % modulus) % modulus;
    if pad_length == 0 {
        pad_length = modulus;
    }
    let mut padded = buffer.to_vec();
    padded.extend(std::iter::repeat(pad_length as u8).take(pad_length));
    Ok(padded)
}

/// Verify and remove padding added by [`pad`].
pub fn strip_pad(buffer: &[u8], modulus: usize) -> Result<Vec<u8>> {
    if modulus == 0 || modulus > 255 {
        return Err(KeyReuseError::InvalidModulus(modulus));
    }
    if buffer.is_empty() || buffer.len() % modulus != 0 {
        return Err(KeyReuseError::WrongPaddedLength {
            len: buffer.len(),
            modulus,
        });
    }
    let pad_byte = buffer[buffer.len() - 1];
    let pad_length = pad_byte as usize;
    if pad_length == 0 || pad_length > buffer.len() {
        return Err(KeyReuseError::InvalidPadding);
    }
    let tail = &buffer[buffer.len() - pad_length..];
    if !tail.iter().all(|&b| b == pad_byte) {
        return Err(KeyReuseError::InvalidPadding);
    }
    Ok(buffer[..buffer.len() - pad_length].to_vec())
}

pub fn hex_to_base64(input: &str) -> Result<String> {
    let raw = hex::decode(input.trim())?;
    Ok(BASE64.encode(raw))
}

pub fn base64_to_hex(input: &str) -> Result<String> {
    let raw = BASE64.decode(input.trim())?;
    Ok(hex::encode(raw))
}
