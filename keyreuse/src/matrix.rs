use crate::distribution::Distribution;
use crate::error::{KeyReuseError, Result};
use crate::evidence::evidence_log_odds;
use crate::models::uniform_bytes;

/// Largest buffer the matrix builder accepts. The matrix holds n*n f64
/// cells, so 8192 bytes of input already costs 512 MiB; anything beyond
/// that is rejected up front instead of dying on allocation.
pub const MAX_BUFFER_LEN: usize = 8192;

/// Dense n x n evidence table for a buffer: cell (i, j) holds the
/// log-odds that `buffer[i] ^ buffer[j]` came from the hypothesis model
/// rather than from uniform random bytes.
///
/// XOR is symmetric, so only the lower triangle is computed and mirrored.
/// The main diagonal is the degenerate zero-byte case (a byte XORed with
/// itself) and carries no information; scanners skip it.
#[derive(Debug, Clone)]
pub struct EvidenceMatrix {
    len: usize,
    cells: Vec<f64>,
}

impl EvidenceMatrix {
    pub fn build(buffer: &[u8], hypothesis: &Distribution) -> Result<Self> {
        let len = buffer.len();
        if len > MAX_BUFFER_LEN {
            return Err(KeyReuseError::BufferTooLarge {
                len,
                max: MAX_BUFFER_LEN,
            });
        }

        // One evidence value per possible XOR result, so each cell is a
        // single table hit.
        let mut by_xor = [0.0f64; 256];
        for (value, slot) in by_xor.iter_mut().enumerate() {
            *slot = evidence_log_odds(value as u8, hypothesis, uniform_bytes());
        }

        let mut cells = vec![0.0; len * len];
        for i in 0..len {
            for j in 0..=i {
                let value = by_xor[(buffer[i] ^ buffer[j]) as usize];
                cells[i * len + j] = value;
                cells[j * len + i] = value;
            }
        }
        Ok(Self { len, cells })
    }

    /// Buffer length n; the matrix is n x n.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.len + col]
    }

    /// Evidence values along the diagonal of constant offset `offset`:
    /// the cells (j + offset, j) for j in 0..len - offset, in ascending
    /// j order.
    pub fn diagonal(&self, offset: usize) -> Vec<f64> {
        (0..self.len.saturating_sub(offset))
            .map(|j| self.get(j + offset, j))
            .collect()
    }

    /// All cells in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.cells
    }
}
