#![allow(missing_docs, clippy::tests_outside_test_module)]

use std::{fs, path::PathBuf, process::Command};

use assert_cmd::{
    assert::{Assert, OutputAssertExt},
    cargo::CommandCargoExt,
};
use tempfile::{TempDir, tempdir};

/// Sol: mass code 3, sector (39, 32, 18), boxel (0, 0, 13).
const SOL: &str = "10477373803";

const SECTOR_LIST: &str = "\
Sector,id64 X,id64 Y,id64 Z
Col 285,39,32,18
Skipped,,,
";

fn sector_list() -> (TempDir, PathBuf) {
    let td = tempdir().expect("tmp");
    let path = td.path().join("sectors.csv");
    fs::write(&path, SECTOR_LIST).expect("write sector list");
    (td, path)
}

#[allow(deprecated)]
fn run(sectors: Option<&PathBuf>, args: &[&str]) -> Assert {
    let mut cmd = Command::cargo_bin("boxel-survey").expect("binary exists");
    cmd.env_remove("BOXEL_SECTORS");
    if let Some(path) = sectors {
        cmd.arg("--sectors").arg(path);
    }
    cmd.args(args);
    cmd.assert()
}

fn stdout(assert: &Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout")
}

fn stderr(assert: &Assert) -> String {
    String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr")
}

#[test]
fn name_uses_sector_list() {
    let (_td, path) = sector_list();
    let out = run(Some(&path), &["name", SOL]).success();
    assert_eq!(stdout(&out), "Col 285 AC-D d12-0\n");
}

#[test]
fn name_without_sector_list_is_unknown() {
    let out = run(None, &["name", SOL]).success();
    assert_eq!(stdout(&out), "Unknown Sector AC-D d12-0\n");
}

#[test]
fn decode_then_encode_roundtrips() {
    let out = run(None, &["decode", "0x27080096B"]).success();
    let text = stdout(&out);
    assert!(text.contains("mass_code: 3 (d)"), "{text}");
    assert!(text.contains("sector: (39, 32, 18)"), "{text}");

    let out = run(
        None,
        &["encode", "--mass-code", "3", "--sector", "39,32,18", "--boxel", "0,0,13"],
    )
    .success();
    assert_eq!(stdout(&out), format!("{SOL}\n"));
}

#[test]
fn encode_overflow_names_field() {
    let out = run(
        None,
        &["encode", "--mass-code", "6", "--sector", "1,1,1", "--boxel", "2,0,0"],
    )
    .failure();
    assert!(stderr(&out).contains("boxel_x"), "{}", stderr(&out));
}

#[test]
fn next_skips_known_indices() {
    let (_td, path) = sector_list();
    let out = run(Some(&path), &["next", SOL, "--known", "0,1,2"]).success();
    assert_eq!(stdout(&out), "Col 285 AC-D d12-3\n");

    let out = run(Some(&path), &["next", SOL, "--known", "0", "--known", "2"]).success();
    assert_eq!(stdout(&out), "Col 285 AC-D d12-1\n");

    let out = run(Some(&path), &["next", SOL]).success();
    assert_eq!(stdout(&out), "Col 285 AC-D d12-1\n");
}

#[test]
fn next_reads_catalogue_file() {
    let (td, path) = sector_list();
    let catalogue = td.path().join("catalogue.txt");
    fs::write(
        &catalogue,
        "Col 285 AC-D d12-0\nCol 285 AC-D d12-1\nCol 285 AC-D d12-2\nCol 285 AC-D d13-3\nSol\n",
    )
    .expect("write catalogue");

    let out = run(
        Some(&path),
        &["next", SOL, "--catalogue", catalogue.to_str().expect("utf8 path")],
    )
    .success();
    assert_eq!(stdout(&out), "Col 285 AC-D d12-3\n");

    let out = run(
        Some(&path),
        &[
            "next",
            SOL,
            "--catalogue",
            catalogue.to_str().expect("utf8 path"),
            "--include-known",
        ],
    )
    .success();
    assert_eq!(stdout(&out), "Col 285 AC-D d12-1\n");
}

#[test]
fn boxel_and_position() {
    let (_td, path) = sector_list();
    let out = run(Some(&path), &["position", SOL]).success();
    assert_eq!(stdout(&out), "h: 4087\nmax_h: 4095\n");

    let out = run(Some(&path), &["boxel", SOL]).success();
    assert_eq!(stdout(&out), "Col 285 EI-B d13-0\n");

    run(Some(&path), &["boxel", SOL, "--offset", "-4087"]).success();
}

#[test]
fn finest_mass_code_has_no_boxels() {
    let out = run(None, &["boxel", "7"]).failure();
    assert!(stderr(&out).contains("no boxel subdivision"), "{}", stderr(&out));
}

#[test]
fn parse_and_lookup() {
    let (_td, path) = sector_list();
    let out = run(None, &["parse", "Col 285 AC-D d12-5"]).success();
    assert_eq!(stdout(&out), "prefix: Col 285 AC-D d12-\nindex: 5\nmass_code: 3\n");

    run(None, &["parse", "Sol"]).failure();

    let out = run(Some(&path), &["lookup", "Col 285 AC-D d12-0"]).success();
    assert_eq!(stdout(&out), format!("{SOL}\n"));
}

#[test]
fn survey_prints_snapshot() {
    let (_td, path) = sector_list();
    let out = run(Some(&path), &["survey", SOL, "--known", "0,1"]).success();
    assert_eq!(
        stdout(&out),
        "System: Col 285 AC-D d12-0\n\
         2 Known | 2 Estim.\n\
         Next Star: Col 285 AC-D d12-2\n\
         Next Boxel: Col 285 EI-B d13-0\n\
         Boxel 4087 (+1)\n"
    );
}

#[test]
fn survey_steps_are_clamped() {
    let (_td, path) = sector_list();
    // h = 4087, max_h = 4095: at most +8.
    let out = run(Some(&path), &["survey", SOL, "--steps", "50"]).success();
    let text = stdout(&out);
    assert!(text.contains("Boxel 4087 (+8)"), "{text}");
    assert!(text.contains("No Boxel Stats Available"), "{text}");
}

#[test]
fn malformed_sector_list_fails() {
    let td = tempdir().expect("tmp");
    let path = td.path().join("bad.csv");
    fs::write(&path, "Sector,id64 X,id64 Y,id64 Z\nBroken,1,,3\n").expect("write");
    let out = run(Some(&path), &["name", SOL]).failure();
    assert!(stderr(&out).contains("loading sector list"), "{}", stderr(&out));
}
