mod help_test;
mod install_test;
mod version_test;

use common::RidkTest;

#[test]
fn no_subcommand_is_an_error() {
    let test = RidkTest::new();
    let result = test.ridk(&[]);
    result.assert_failure();
    assert!(result.stderr().contains("Usage"));
}
