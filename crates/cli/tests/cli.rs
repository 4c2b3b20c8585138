use assert_cmd::Command;

#[test]
fn routes_lists_every_module_endpoint() {
    let output = Command::cargo_bin("playground")
        .unwrap()
        .arg("routes")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    for path in ["/api/books/{id}", "/api/search", "/api/users", "/api/calculate"] {
        assert!(stdout.contains(path), "missing {path} in:\n{stdout}");
    }
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("playground")
        .unwrap()
        .arg("launch")
        .assert()
        .failure();
}
