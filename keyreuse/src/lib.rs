//! Keyreuse - Statistical Keystream-Reuse Detection
//!
//! Detects reuse of an XOR keystream inside a single byte buffer. When two
//! regions of ciphertext were encrypted with the same keystream at a fixed
//! relative offset, their XOR equals the XOR of the two underlying
//! plaintexts, which is statistically distinguishable from random bytes.
//!
//! ## Analysis Pipeline
//!
//! ```text
//! Buffer → Evidence Matrix → Diagonal Scan → Run Partition → Dedup → Matches
//!        → Plaintext Evidence Vector → Run Partition → Spans
//! ```
//!
//! - **Evidence Matrix**: cell (i, j) holds the log-odds, in bits, that
//!   `buffer[i] ^ buffer[j]` came from an XOR-of-two-plaintexts model
//!   rather than from uniform random bytes
//! - **Diagonal Scan**: each constant-offset diagonal is a candidate
//!   keystream alignment
//! - **Run Partition**: turns the noisy 1-D evidence signal into discrete
//!   qualifying regions, tolerating bounded negative interruptions
//! - **Dedup**: a suffix of a valid match is trivially also valid and is
//!   dropped
//!
//! The whole pipeline is synchronous and batch-oriented: the buffer is
//! fully in memory and the matrix is O(n²), which bounds feasible input
//! sizes (see [`matrix::MAX_BUFFER_LEN`]).
//!
//! ## Example
//!
//! ```no_run
//! use keyreuse::{analyze, xor::repeating_key_xor};
//!
//! // Two copies of a message under the same single-byte key.
//! let buffer = repeating_key_xor(b"HELLOHELLO", &[0x2A]);
//! let analysis = analyze(&buffer).unwrap();
//! for m in &analysis.matches {
//!     println!(
//!         "offsets {} and {}, length {}",
//!         m.offsets.0, m.offsets.1, m.length
//!     );
//! }
//! ```

pub mod analysis;
pub mod distribution;
pub mod error;
pub mod evidence;
pub mod heatmap;
pub mod matcher;
pub mod matrix;
pub mod models;
pub mod partition;
pub mod plaintext;
pub mod xor;

pub use analysis::{analyze, analyze_with_threshold, Analysis};
pub use distribution::Distribution;
pub use error::{KeyReuseError, Result};
pub use evidence::{evidence_log_odds, MIN_EVIDENCE};
pub use matcher::{find_parallel_ciphers, significance_threshold, Match};
pub use matrix::EvidenceMatrix;
pub use partition::{partition, Run};
pub use plaintext::{find_plaintext_spans, Span};
