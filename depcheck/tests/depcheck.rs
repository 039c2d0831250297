use assert_cmd::Command;

const EXPECTED_LINES: [&str; 5] = [
    "lattice-boltzmann solver: ok",
    "rayon parallel runtime: ok",
    "system diagnostics: ok",
    "rust toolchain: ok",
    "all dependency checks passed",
];

#[test]
fn confirmation_lines_appear_once_each_in_order() {
    let output = Command::cargo_bin("depcheck").unwrap().output().unwrap();
    assert!(output.status.success(), "depcheck exited nonzero");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut last = 0;
    for needle in EXPECTED_LINES {
        assert_eq!(
            stdout.matches(needle).count(),
            1,
            "expected exactly one `{needle}` line in:\n{stdout}"
        );
        let pos = stdout.find(needle).unwrap();
        assert!(pos >= last, "`{needle}` appeared out of order in:\n{stdout}");
        last = pos;
    }
}

#[test]
fn no_arguments_are_required() {
    Command::cargo_bin("depcheck").unwrap().assert().success();
}
