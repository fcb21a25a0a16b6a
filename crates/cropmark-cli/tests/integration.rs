//! Integration tests for cropmark CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::Command;

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_cropmark")
}

/// Get the path to the test SVG file at the repo root.
fn test_svg_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from cropmark-cli to crates
    path.pop(); // Go up from crates to repo root
    path.push("test_assets/plot.svg");
    path
}

#[test]
fn crop_command_produces_svg() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let output = Command::new(binary_path())
        .args(["crop", svg_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("M 10 10 L 90 90"), "Inside path survives untouched");
    assert!(!stdout.contains("M 200 200"), "Outside path is removed");
    assert!(
        stdout.contains("M 0.000000 50.000000"),
        "Crossing path is rewritten"
    );
    assert!(!stdout.contains("<rect"), "Background rect is removed");
}

#[test]
fn crop_command_reports_summary() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let output = Command::new(binary_path())
        .args(["crop", svg_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Processed 3 paths: 1 clipped, 1 discarded, 0 skipped, 2 exported"),
        "Unexpected summary: {}",
        stderr
    );
}

#[test]
fn crop_command_json_summary() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let output = Command::new(binary_path())
        .args(["crop", svg_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("Summary should be valid JSON");

    assert_eq!(summary["processed"], 3);
    assert_eq!(summary["discarded"], 1);
    assert_eq!(summary["clipped"], 1);
    assert_eq!(summary["exported"], 2);
    assert_eq!(summary["skipped"], 0);
}

#[test]
fn crop_command_convex_algorithm_agrees() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let via_box = Command::new(binary_path())
        .args(["crop", svg_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    let via_convex = Command::new(binary_path())
        .args(["crop", svg_path.to_str().unwrap(), "--algorithm", "convex"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(via_box.stdout, via_convex.stdout);
}

#[test]
fn crop_command_custom_bounds() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let output = Command::new(binary_path())
        .args([
            "crop",
            svg_path.to_str().unwrap(),
            "--bounds",
            "0 0 50 50",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("Summary should be valid JSON");

    // Against the 50x50 window the diagonal path gets clipped too.
    assert_eq!(summary["clipped"], 2);
}

#[test]
fn crop_command_reads_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let svg = r#"<svg width="100" height="100"><g><path d="M 200 200 L 300 300"/></g></svg>"#;

    let mut child = Command::new(binary_path())
        .args(["crop", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .as_mut()
        .expect("stdin should be piped")
        .write_all(svg.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("<path"), "Outside path is removed");
}

#[test]
fn crop_command_fails_fast_on_bad_path() {
    use std::io::Write;
    use std::process::Stdio;

    let svg = r#"<svg width="100" height="100"><g><path d="M 0 0 C 1 1 2 2 3 3"/></g></svg>"#;

    let run = |extra: &[&str]| {
        let mut args = vec!["crop", "-"];
        args.extend_from_slice(extra);
        let mut child = Command::new(binary_path())
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn command");
        child
            .stdin
            .as_mut()
            .expect("stdin should be piped")
            .write_all(svg.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for command")
    };

    let failed = run(&[]);
    assert!(!failed.status.success());
    let stderr = String::from_utf8_lossy(&failed.stderr);
    assert!(stderr.contains("unsupported path command"), "stderr: {}", stderr);

    let kept = run(&["--keep-going"]);
    assert!(kept.status.success());
    let stdout = String::from_utf8_lossy(&kept.stdout);
    assert!(stdout.contains("C 1 1 2 2 3 3"), "Skipped path left in place");
}

#[test]
fn inspect_command_reports_outcomes() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let output = Command::new(binary_path())
        .args(["inspect", svg_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Canvas: 100 x 100"));
    assert!(stdout.contains("Background rect: present"));
    assert!(stdout.contains("path 0: unchanged"));
    assert!(stdout.contains("path 1: discarded"));
    assert!(stdout.contains("path 2: clipped"));
    assert!(stdout.contains("Would process 3 paths"));
}

#[test]
fn inspect_command_does_not_mutate() {
    let svg_path = test_svg_path();
    if !svg_path.exists() {
        eprintln!("Skipping test - test SVG not found at {:?}", svg_path);
        return;
    }

    let before = std::fs::read_to_string(&svg_path).expect("Failed to read asset");
    Command::new(binary_path())
        .args(["inspect", svg_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    let after = std::fs::read_to_string(&svg_path).expect("Failed to read asset");
    assert_eq!(before, after);
}

#[test]
fn unknown_command_exits_nonzero() {
    let output = Command::new(binary_path())
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}

#[test]
fn crop_option_without_value_exits_nonzero() {
    for option in ["-o", "--output", "--bounds", "--algorithm"] {
        let output = Command::new(binary_path())
            .args(["crop", option])
            .output()
            .expect("Failed to execute command");
        assert!(!output.status.success(), "{} without a value should fail", option);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("requires a value"),
            "Unexpected stderr for {}: {}",
            option,
            stderr
        );
    }
}
