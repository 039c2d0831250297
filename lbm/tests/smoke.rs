use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn small_lattice_run_exits_zero() {
    Command::cargo_bin("lbm_smoke")
        .unwrap()
        .args(["--nx", "8", "--ny", "8", "--nz", "8", "--iterations", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total mass"));
}

#[test]
fn run_record_is_written_when_requested() {
    let dir = std::env::temp_dir().join("lbm_smoke_record_test");
    let path = dir.join("smoke.jsonl");
    let _ = std::fs::remove_file(&path);

    Command::cargo_bin("lbm_smoke")
        .unwrap()
        .args(["--nx", "4", "--ny", "4", "--nz", "4", "--iterations", "2"])
        .arg("--record")
        .arg(&path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("\"total_mass\""));
}
