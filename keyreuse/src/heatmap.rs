//! Evidence heat-map rendering. Visualization only: the color mapping is
//! not a contract the analysis core preserves.

use crate::error::{KeyReuseError, Result};
use crate::matrix::EvidenceMatrix;
use image::{ImageFormat, Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Cells below this many bits are saturated "impossible" values and are
/// excluded from the z-score statistics.
const SANITY_CUTOFF: f64 = -5.0;

/// Mean of the discrete uniform distribution over 0..=255, the target
/// range for channel intensities.
const RGB_MEAN: f64 = 127.5;

/// Render the evidence matrix as an n x n red/blue PNG: red where the
/// evidence z-score is high, blue where it is low. Columns are flipped so
/// cell (0, 0) lands at the bottom-left of the image.
pub fn render_heatmap(matrix: &EvidenceMatrix, path: &Path) -> Result<()> {
    let n = matrix.len();
    if n == 0 {
        return Err(KeyReuseError::EmptyMatrix);
    }
    let (mean, stdev) = evidence_stats(matrix);
    let rgb_stdev = ((256.0f64 * 256.0 - 1.0) / 12.0).sqrt();

    let mut img = RgbImage::new(n as u32, n as u32);
    for i in 0..n {
        for j in 0..n {
            let value = matrix.get(i, n - j - 1);
            let z = if stdev > 0.0 { (value - mean) / stdev } else { 0.0 };
            let red = clamp_channel(RGB_MEAN + z * rgb_stdev);
            let blue = clamp_channel(RGB_MEAN - z * rgb_stdev);
            img.put_pixel(j as u32, i as u32, Rgb([red, 0, blue]));
        }
    }

    let file = File::create(path)?;
    img.write_to(&mut BufWriter::new(file), ImageFormat::Png)?;
    Ok(())
}

/// Mean and population stdev of all cells above the sanity cutoff.
fn evidence_stats(matrix: &EvidenceMatrix) -> (f64, f64) {
    let values: Vec<f64> = matrix
        .values()
        .iter()
        .copied()
        .filter(|&v| v > SANITY_CUTOFF)
        .collect();
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (mean, variance.sqrt())
}

fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
