use keyreuse::xor::repeating_key_xor;
use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn reusefinder_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reusefinder"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(reusefinder_cmd().args(args).output()?)
}

#[test]
fn scan_reports_a_reused_keystream() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("cipher.bin");
    fs::write(&input, repeating_key_xor(b"HELLOHELLO", &[0x5A]))?;

    let output = run(&["scan", input.to_str().unwrap()])?;
    assert!(
        output.status.success(),
        "scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Keystream Reuse Analysis"));
    assert!(stdout.contains("Suspected key reuse instances:"));
    assert!(stdout.contains("offsets 5 and 0, length 5"));
    Ok(())
}

#[test]
fn scan_emits_machine_readable_json() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("cipher.bin");
    fs::write(&input, repeating_key_xor(b"HELLOHELLO", &[0x5A]))?;

    let output = run(&["scan", "--json", input.to_str().unwrap()])?;
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["bytes_analyzed"], 10);
    let matches = report["matches"].as_array().expect("matches array");
    assert!(matches
        .iter()
        .any(|m| m["offsets"] == serde_json::json!([5, 0]) && m["length"] == 5));
    Ok(())
}

#[test]
fn scan_writes_a_heatmap_png() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("cipher.bin");
    let heatmap = dir.path().join("evidence.png");
    fs::write(&input, repeating_key_xor(b"HELLOHELLO", &[0x5A]))?;

    let output = run(&[
        "scan",
        "--heatmap",
        heatmap.to_str().unwrap(),
        input.to_str().unwrap(),
    ])?;
    assert!(output.status.success());

    let image = fs::read(&heatmap)?;
    assert!(image.starts_with(b"\x89PNG"), "not a PNG file");
    Ok(())
}

#[test]
fn break_recovers_readable_text() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("cipher.bin");
    fs::write(
        &input,
        repeating_key_xor(b"thequickbrownfoxjumpsoverthelazydog", &[0x35]),
    )?;

    let output = run(&["break", input.to_str().unwrap()])?;
    assert!(
        output.status.success(),
        "break failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Single-Byte XOR Break"));
    assert!(stdout
        .to_lowercase()
        .contains("thequickbrownfoxjumpsoverthelazydog"));
    Ok(())
}

#[test]
fn empty_files_are_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("empty.bin");
    fs::write(&input, b"")?;

    let output = run(&["scan", input.to_str().unwrap()])?;
    assert!(!output.status.success());
    Ok(())
}
