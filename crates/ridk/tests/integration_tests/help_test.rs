use crate::common::RidkTest;

#[test]
fn help_lists_every_operation() {
    let test = RidkTest::new();
    let output = test.ridk(&["help"]);
    output.assert_success();

    let stdout = output.stdout();
    for operation in ["install", "enable", "disable", "exec", "help", "version"] {
        assert!(
            stdout.contains(operation),
            "help output should mention {operation:?}:\n{stdout}"
        );
    }
}

#[test]
fn help_flag_matches_help_subcommand() {
    let test = RidkTest::new();
    let output = test.ridk(&["--help"]);
    output.assert_success();
    assert!(output.stdout().contains("Usage"));
}
