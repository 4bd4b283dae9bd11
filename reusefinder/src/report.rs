use anyhow::{bail, Result};
use keyreuse::heatmap::render_heatmap;
use keyreuse::xor::break_single_byte_xor;
use keyreuse::{analyze, analyze_with_threshold, Analysis};
use serde_json::json;
use std::path::Path;

/// Run the full keystream-reuse analysis on a file and format a report.
pub fn scan(
    path: &Path,
    threshold: Option<f64>,
    heatmap: Option<&Path>,
    json: bool,
) -> Result<String> {
    let data = std::fs::read(path)?;
    if data.is_empty() {
        bail!("File is empty");
    }

    let analysis = match threshold {
        Some(bits) => analyze_with_threshold(&data, bits)?,
        None => analyze(&data)?,
    };

    if let Some(image_path) = heatmap {
        render_heatmap(&analysis.matrix, image_path)?;
    }

    if json {
        return json_report(path, data.len(), &analysis);
    }
    Ok(text_report(path, data.len(), &analysis))
}

fn json_report(path: &Path, bytes: usize, analysis: &Analysis) -> Result<String> {
    let report = json!({
        "file": path.display().to_string(),
        "bytes_analyzed": bytes,
        "threshold_bits": analysis.threshold,
        "matches": analysis.matches,
        "plaintext_spans": analysis.plaintext_spans,
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
}

fn text_report(path: &Path, bytes: usize, analysis: &Analysis) -> String {
    let mut output = String::new();
    output.push_str("Keystream Reuse Analysis\n");
    output.push_str("========================\n\n");
    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Bytes analyzed: {}\n", bytes));
    output.push_str(&format!(
        "Significance threshold: {:.2} bits\n\n",
        analysis.threshold
    ));

    if analysis.matches.is_empty() {
        output.push_str("No suspected key reuse found\n");
    } else {
        output.push_str("Suspected key reuse instances:\n");
        for m in &analysis.matches {
            output.push_str(&format!(
                "  offsets {} and {}, length {}\n",
                m.offsets.0, m.offsets.1, m.length
            ));
        }
    }

    if analysis.plaintext_spans.is_empty() {
        output.push_str("No suspected plaintext intervals found\n");
    } else {
        output.push_str("Suspected plaintext intervals:\n");
        for span in &analysis.plaintext_spans {
            output.push_str(&format!(
                "  from offset {} to offset {}\n",
                span.start, span.end
            ));
        }
    }

    output
}

/// Try all 256 single-byte XOR keys against a file and report the most
/// plausible decryption.
pub fn break_single_byte(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    if data.is_empty() {
        bail!("File is empty");
    }

    let result = break_single_byte_xor(&data);

    let mut output = String::new();
    output.push_str("Single-Byte XOR Break\n");
    output.push_str("=====================\n\n");
    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Best key: 0x{:02X}\n", result.key));
    if result.surprise_bits.is_finite() {
        output.push_str(&format!("Surprise: {:.1} bits\n", result.surprise_bits));
    } else {
        output.push_str("Surprise: no key produced plausible text\n");
    }

    let preview_len = result.plaintext.len().min(256);
    output.push_str(&format!("\nRecovered text (first {} bytes):\n", preview_len));
    output.push_str(&printable_preview(&result.plaintext[..preview_len]));
    output.push('\n');
    Ok(output)
}

fn printable_preview(data: &[u8]) -> String {
    data.iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
