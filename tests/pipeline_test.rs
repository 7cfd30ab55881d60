// End-to-end pipeline tests against stub external tools
//
// Each test builds a directory of fake scanimage/tesseract/gs executables,
// prepends it to PATH, and runs the binary in a scratch working directory.
// No scanner, tesseract, or Ghostscript installation is required.

#![cfg(unix)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scandoc"))
}

/// Write an executable shell stub into `dir`.
fn write_stub(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
    let mut perms = std::fs::metadata(&path).expect("stub metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod stub");
}

/// Stub directory with well-behaved versions of all three tools.
///
/// The scanimage stub writes raster bytes to stdout and records its
/// arguments in `args-scanimage.txt` next to itself. The gs stub writes
/// its full argument list into the -sOutputFile target, so different
/// profiles produce different sizes.
fn working_stubs() -> TempDir {
    let dir = tempfile::tempdir().expect("create stub dir");
    write_stub(
        dir.path(),
        "scanimage",
        &format!(
            "echo \"$@\" > \"{}/args-scanimage.txt\"\nprintf 'TIFFDATA'",
            dir.path().display()
        ),
    );
    write_stub(dir.path(), "tesseract", r#"printf 'OCRPDF' > "$2.pdf""#);
    write_stub(
        dir.path(),
        "gs",
        r#"out=""
for a in "$@"; do
  case "$a" in
    -sOutputFile=*) out="${a#-sOutputFile=}" ;;
  esac
done
printf 'GS:%s' "$*" > "$out""#,
    );
    dir
}

fn path_with(stub_dir: &Path) -> String {
    format!(
        "{}:{}",
        stub_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    )
}

fn run_in(work: &Path, stubs: &Path, args: &[&str]) -> std::process::Output {
    cargo_bin()
        .current_dir(work)
        .env("PATH", path_with(stubs))
        .args(args)
        .output()
        .expect("failed to execute binary")
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================
// 1. Successful runs and clean levels
// ============================================================

#[test]
fn test_full_run_keeps_all_files_at_clean_zero() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");

    let output = run_in(work.path(), stubs.path(), &[]);
    assert!(output.status.success(), "pipeline should succeed: {output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OK: scan.pdf"), "got: {stderr}");

    assert_eq!(
        file_names(work.path()),
        vec!["scan.ocr.pdf", "scan.pdf", "scan.tiff"],
        "clean level 0 keeps every intermediate"
    );
    assert_eq!(
        std::fs::read(work.path().join("scan.tiff")).expect("read raster"),
        b"TIFFDATA"
    );
}

#[test]
fn test_clean_one_removes_raster() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");

    let output = run_in(work.path(), stubs.path(), &["-c"]);
    assert!(output.status.success(), "pipeline should succeed");

    assert_eq!(file_names(work.path()), vec!["scan.ocr.pdf", "scan.pdf"]);
}

#[test]
fn test_clean_two_leaves_only_final_pdf() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");

    let output = run_in(work.path(), stubs.path(), &["-cc"]);
    assert!(output.status.success(), "pipeline should succeed");

    assert_eq!(
        file_names(work.path()),
        vec!["scan.pdf"],
        "exactly one final PDF remains"
    );
}

#[test]
fn test_custom_output_basename() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");

    let output = run_in(work.path(), stubs.path(), &["-cc", "invoice"]);
    assert!(output.status.success(), "pipeline should succeed");

    assert_eq!(file_names(work.path()), vec!["invoice.pdf"]);
}

#[test]
fn test_clean_three_deletes_preexisting_collisions() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");
    std::fs::write(work.path().join("scan.pdf"), b"OLD FINAL").expect("seed final");
    std::fs::write(work.path().join("scan.tiff"), b"OLD RASTER").expect("seed raster");

    let output = run_in(work.path(), stubs.path(), &["-ccc"]);
    assert!(output.status.success(), "pipeline should succeed");

    // A fresh scan was forced rather than reusing the stale raster.
    assert!(
        stubs.path().join("args-scanimage.txt").exists(),
        "clean level 3 must re-scan"
    );

    assert_eq!(file_names(work.path()), vec!["scan.pdf"]);
    let final_pdf = std::fs::read(work.path().join("scan.pdf")).expect("read final");
    assert!(
        final_pdf.starts_with(b"GS:"),
        "stale final PDF must be replaced by the new output"
    );
}

// ============================================================
// 2. Raster reuse
// ============================================================

#[test]
fn test_existing_raster_skips_scan() {
    let stubs = working_stubs();
    // A scanimage that always fails: the scan stage must not run.
    write_stub(stubs.path(), "scanimage", "echo 'no device' >&2; exit 1");

    let work = tempfile::tempdir().expect("create work dir");
    std::fs::write(work.path().join("scan.tiff"), b"SEEDED").expect("seed raster");

    let output = run_in(work.path(), stubs.path(), &[]);
    assert!(
        output.status.success(),
        "existing raster should be reused without scanning: {output:?}"
    );
    assert!(work.path().join("scan.pdf").exists());
}

// ============================================================
// 3. Stage failures abort the pipeline
// ============================================================

#[test]
fn test_scan_failure_names_device_and_command() {
    let stubs = working_stubs();
    write_stub(stubs.path(), "scanimage", "echo 'I/O error' >&2; exit 1");

    let work = tempfile::tempdir().expect("create work dir");
    let output = run_in(work.path(), stubs.path(), &[]);

    assert!(!output.status.success(), "scan failure should abort");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("brother4:net1;dev0"), "got: {stderr}");
    assert!(stderr.contains("scanimage"), "got: {stderr}");
    assert!(stderr.contains("I/O error"), "got: {stderr}");
}

#[test]
fn test_failed_scan_leaves_no_raster_behind() {
    let stubs = working_stubs();
    write_stub(stubs.path(), "scanimage", "echo 'paper jam' >&2; exit 1");

    let work = tempfile::tempdir().expect("create work dir");
    let output = run_in(work.path(), stubs.path(), &[]);
    assert!(!output.status.success(), "scan failure should abort");
    assert!(
        !work.path().join("scan.tiff").exists(),
        "a failed scan must not leave a truncated raster behind"
    );

    // With the scanner repaired, the next run must scan afresh instead
    // of picking up leftovers from the failed attempt.
    let repaired = working_stubs();
    let output = run_in(work.path(), repaired.path(), &[]);
    assert!(output.status.success(), "re-run should succeed: {output:?}");
    assert!(
        repaired.path().join("args-scanimage.txt").exists(),
        "re-run must invoke the scanner again"
    );
    assert_eq!(
        std::fs::read(work.path().join("scan.tiff")).expect("read raster"),
        b"TIFFDATA"
    );
}

#[test]
fn test_ocr_failure_leaves_raster_for_inspection() {
    let stubs = working_stubs();
    write_stub(stubs.path(), "tesseract", "echo 'ocr blew up' >&2; exit 1");

    let work = tempfile::tempdir().expect("create work dir");
    let output = run_in(work.path(), stubs.path(), &["-cc"]);

    assert!(!output.status.success(), "OCR failure should abort");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tesseract"), "got: {stderr}");
    assert!(stderr.contains("ocr blew up"), "got: {stderr}");
    assert!(
        work.path().join("scan.tiff").exists(),
        "raster must stay on disk after an OCR failure"
    );
    assert!(!work.path().join("scan.pdf").exists());
}

#[test]
fn test_compress_failure_aborts() {
    let stubs = working_stubs();
    write_stub(stubs.path(), "gs", "echo 'bad pdf' >&2; exit 1");

    let work = tempfile::tempdir().expect("create work dir");
    let output = run_in(work.path(), stubs.path(), &[]);

    assert!(!output.status.success(), "compression failure should abort");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gs"), "got: {stderr}");
    assert!(!work.path().join("scan.pdf").exists());
}

#[test]
fn test_missing_tool_reported() {
    let stubs = tempfile::tempdir().expect("create stub dir");
    // Only the scanner exists; tesseract is absent from the stub PATH.
    write_stub(stubs.path(), "scanimage", "printf 'TIFFDATA'");

    let work = tempfile::tempdir().expect("create work dir");
    let output = cargo_bin()
        .current_dir(work.path())
        .env("PATH", stubs.path().display().to_string())
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success(), "missing tool should abort");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cannot find executable 'tesseract'"),
        "got: {stderr}"
    );
}

// ============================================================
// 4. Benchmark mode
// ============================================================

#[test]
fn test_benchmark_leaves_no_trial_files() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");

    let output = run_in(work.path(), stubs.path(), &["--benchmark", "-cc"]);
    assert!(output.status.success(), "benchmark should succeed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for profile in ["low", "medium", "high", "extreme"] {
        assert!(stdout.contains(profile), "report should list {profile}");
    }

    assert!(
        file_names(work.path()).is_empty(),
        "benchmark with -cc must leave nothing behind, got: {:?}",
        file_names(work.path())
    );
}

#[test]
fn test_benchmark_json_report() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");

    let output = run_in(work.path(), stubs.path(), &["--benchmark", "--json"]);
    assert!(output.status.success(), "benchmark should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    let entries = report.as_array().expect("report should be an array");
    assert_eq!(entries.len(), 4, "one entry per profile");
    for entry in entries {
        assert!(entry["profile"].is_string());
        assert!(
            entry["bytes"].as_u64().expect("bytes should be a number") > 0,
            "trial outputs should have been measured before removal"
        );
    }

    // Trial outputs are removed even when intermediates are kept.
    for profile in ["low", "medium", "high", "extreme"] {
        assert!(
            !work.path().join(format!("scan.{profile}.pdf")).exists(),
            "{profile} trial file must be removed"
        );
    }
}

// ============================================================
// 5. Settings and presets drive the scan command
// ============================================================

#[test]
fn test_preset_expands_to_flag_set() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");
    std::fs::write(
        work.path().join("scandoc.yaml"),
        r#"
resolution: 150
presets:
  receipt:
    mode: bw
    papersize: "a6"
"#,
    )
    .expect("write settings");

    let output = run_in(work.path(), stubs.path(), &["-P", "receipt"]);
    assert!(output.status.success(), "preset run should succeed: {output:?}");

    let args = std::fs::read_to_string(stubs.path().join("args-scanimage.txt"))
        .expect("scanimage should record its arguments");
    assert!(args.contains("Black & White"), "preset mode applies: {args}");
    assert!(args.contains("-x 105"), "preset papersize applies: {args}");
    assert!(
        args.contains("--resolution 150"),
        "settings default applies beneath the preset: {args}"
    );
}

#[test]
fn test_cli_flag_overrides_preset() {
    let stubs = working_stubs();
    let work = tempfile::tempdir().expect("create work dir");
    std::fs::write(
        work.path().join("scandoc.yaml"),
        r#"
presets:
  receipt:
    mode: bw
"#,
    )
    .expect("write settings");

    let output = run_in(work.path(), stubs.path(), &["-P", "receipt", "-m", "gray"]);
    assert!(output.status.success(), "run should succeed");

    let args = std::fs::read_to_string(stubs.path().join("args-scanimage.txt"))
        .expect("scanimage should record its arguments");
    assert!(args.contains("True Gray"), "CLI flag wins: {args}");
}
