use crate::common::RidkTest;

#[cfg(unix)]
fn logging_pacman(test: &RidkTest) -> camino::Utf8PathBuf {
    let log = test.temp_dir.path().join("pacman.log");
    test.create_msys2_mock("pacman", &format!(r#"printf '%s\n' "$*" >> "{log}""#));
    log
}

#[cfg(unix)]
#[test]
fn install_msys2_pacman_update_refreshes_then_upgrades() {
    let test = RidkTest::new();
    test.create_msys2_tree();
    let log = logging_pacman(&test);

    let output = test.ridk(&["install", "msys2", "pacman_update"]);
    output.assert_success();

    let invocations = std::fs::read_to_string(log).unwrap();
    let lines: Vec<&str> = invocations.lines().collect();
    assert_eq!(lines, vec!["-Sy --noconfirm", "-Su --noconfirm"]);
}

#[cfg(unix)]
#[test]
fn install_mingw_requests_the_toolchain_group() {
    let test = RidkTest::new();
    test.create_msys2_tree();
    let log = logging_pacman(&test);

    let output = test.ridk(&["install", "mingw"]);
    output.assert_success();

    let invocations = std::fs::read_to_string(log).unwrap();
    assert!(invocations.contains("mingw-w64-x86_64-toolchain"));
    assert!(invocations.contains("--needed"));
}

#[cfg(unix)]
#[test]
fn install_forwards_a_pacman_failure() {
    let test = RidkTest::new();
    test.create_msys2_tree();
    test.create_msys2_mock("pacman", "exit 5");

    let output = test.ridk(&["install", "msys2", "pacman_update"]);
    output.assert_failure();
    assert_eq!(output.output.status.code(), Some(5));
}

#[test]
fn install_rejects_an_unknown_component() {
    let test = RidkTest::new();
    test.create_msys2_tree();

    let output = test.ridk(&["install", "wix"]);
    output.assert_failure();
    assert!(output.stderr().contains("unknown component"));
}

#[test]
fn install_rejects_an_unknown_action() {
    let test = RidkTest::new();
    test.create_msys2_tree();

    let output = test.ridk(&["install", "msys2", "frobnicate"]);
    output.assert_failure();
    assert!(output.stderr().contains("unknown action"));
}
