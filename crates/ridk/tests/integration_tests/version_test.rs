use crate::common::RidkTest;
use saphyr::{LoadableYamlNode, Yaml};

fn str_at<'a>(doc: &'a Yaml<'_>, keys: &[&str]) -> Option<&'a str> {
    let mut node = doc;
    for key in keys {
        node = node.as_mapping_get(key)?;
    }
    node.as_str()
}

fn parse(yaml: &str) -> Yaml<'_> {
    let docs = Yaml::load_from_str(yaml).expect("version output must be valid YAML");
    docs.into_iter().next().expect("one YAML document")
}

#[cfg(unix)]
const RUBY_MOCK: &str = r#"if [ "$1" = "-e" ]; then
  echo "3.2.2"
  echo "x64-mingw-ucrt"
fi"#;

#[cfg(unix)]
#[test]
fn version_reports_the_full_toolchain() {
    let mut test = RidkTest::new();
    let root = test.create_msys2_tree();
    test.write_manifest(
        "<Installer><Title>MSYS2 Installer</Title><Version>20230318</Version></Installer>",
    );
    test.create_msys2_mock("ruby", RUBY_MOCK);
    test.create_msys2_mock(
        "gcc",
        r#"echo "gcc (Rev2, Built by MSYS2 project) 13.2.0""#,
    );
    test.create_msys2_mock(
        "bash",
        r#"echo "GNU bash, version 5.2.15(1)-release (x86_64-pc-msys)""#,
    );

    let output = test.ridk(&["version"]);
    output.assert_success();

    let stdout = output.stdout();
    let doc = parse(&stdout);

    assert_eq!(str_at(&doc, &["ruby", "version"]), Some("3.2.2"));
    assert_eq!(str_at(&doc, &["ruby", "platform"]), Some("x64-mingw-ucrt"));
    assert!(str_at(&doc, &["ruby", "path"]).is_some());
    assert_eq!(
        str_at(&doc, &["ruby_installer", "package_version"]),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert!(str_at(&doc, &["ruby_installer", "git_commit"]).is_some());
    assert!(str_at(&doc, &["cc"]).unwrap().contains("gcc"));
    assert!(str_at(&doc, &["sh"]).unwrap().contains("bash"));
    assert_eq!(
        str_at(&doc, &["msys2", "path"]).map(str::to_lowercase),
        Some(root.as_str().to_lowercase())
    );
    assert!(str_at(&doc, &["msys2", "title"]).unwrap().contains("MSYS"));
    let manifest_version = str_at(&doc, &["msys2", "version"]).unwrap();
    assert!(
        regex::Regex::new(r"\d").unwrap().is_match(manifest_version),
        "manifest version should carry a digit: {manifest_version:?}"
    );
}

#[cfg(unix)]
#[test]
fn version_without_msys2_omits_the_block() {
    let mut test = RidkTest::new();
    test.create_path_mock("ruby", RUBY_MOCK);

    let output = test.ridk(&["version"]);
    output.assert_success();

    let stdout = output.stdout();
    let doc = parse(&stdout);

    assert_eq!(str_at(&doc, &["ruby", "version"]), Some("3.2.2"));
    assert_eq!(str_at(&doc, &["ruby", "platform"]), Some("x64-mingw-ucrt"));
    assert!(str_at(&doc, &["ruby_installer", "package_version"]).is_some());
    assert!(str_at(&doc, &["ruby_installer", "git_commit"]).is_some());
    assert!(
        doc.as_mapping_get("msys2").is_none(),
        "msys2 must be absent, not empty:\n{stdout}"
    );
}

#[cfg(unix)]
#[test]
fn version_survives_a_missing_manifest() {
    let test = RidkTest::new();
    let root = test.create_msys2_tree();

    let output = test.ridk(&["version"]);
    output.assert_success();

    let stdout = output.stdout();
    let doc = parse(&stdout);
    assert_eq!(
        str_at(&doc, &["msys2", "path"]),
        Some(root.as_str()),
        "path stays even when components.xml is gone"
    );
    let msys2 = doc.as_mapping_get("msys2").unwrap();
    assert!(msys2.as_mapping_get("title").is_none());
    assert!(msys2.as_mapping_get("version").is_none());
}

#[test]
fn version_never_fails_on_a_bare_host() {
    let test = RidkTest::new();

    let output = test.ridk(&["version"]);
    output.assert_success();

    let stdout = output.stdout();
    let doc = parse(&stdout);
    assert!(str_at(&doc, &["ruby_installer", "package_version"]).is_some());
    assert!(doc.as_mapping_get("msys2").is_none());
}

#[test]
fn version_can_emit_json() {
    let test = RidkTest::new();

    let output = test.ridk(&["version", "--format", "json"]);
    output.assert_success();

    let value: serde_json::Value =
        serde_json::from_str(&output.stdout()).expect("json output must parse");
    assert!(value["ruby_installer"]["package_version"].is_string());
    assert!(value["ruby_installer"]["git_commit"].is_string());
}
