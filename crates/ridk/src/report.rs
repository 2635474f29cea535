use std::process::Command;

use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::process;

/// Ruby one-liner printing the interpreter facts the report needs, one
/// per line.
const RUBY_INFO_SCRIPT: &str = "puts RUBY_VERSION\nputs RUBY_PLATFORM";

/// Diagnostic status of the toolchain, built once per `version`
/// invocation.
///
/// Optional blocks are omitted from the output entirely when the
/// component is absent; a missing compiler or MSYS2 tree is an expected
/// state on some hosts, never a failure of the report itself.
#[derive(Debug, Serialize)]
pub struct ToolchainReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruby: Option<RubyInfo>,
    pub ruby_installer: InstallerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msys2: Option<Msys2Info>,
}

#[derive(Debug, Serialize)]
pub struct RubyInfo {
    pub path: Utf8PathBuf,
    pub version: String,
    pub platform: String,
}

#[derive(Debug, Serialize)]
pub struct InstallerInfo {
    pub package_version: &'static str,
    pub git_commit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Msys2Info {
    pub path: Utf8PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ToolchainReport {
    pub fn collect(config: &Config) -> Self {
        let path = config.enabled_path();

        let msys2 = config.installation.as_ref().map(|installation| {
            let manifest = installation.manifest();
            Msys2Info {
                path: installation.root.clone(),
                title: manifest.as_ref().and_then(|m| m.title.clone()),
                version: manifest.and_then(|m| m.version),
            }
        });

        Self {
            ruby: probe_ruby(&path),
            ruby_installer: InstallerInfo {
                package_version: env!("CARGO_PKG_VERSION"),
                git_commit: option_env!("RIDK_GIT_COMMIT").unwrap_or("unknown"),
            },
            cc: probe_version_line("gcc", &path),
            sh: probe_version_line("bash", &path),
            msys2,
        }
    }

    /// Render the report as the YAML document external tooling parses.
    pub fn to_yaml(&self) -> String {
        let mut out = String::from("---\n");

        if let Some(ruby) = &self.ruby {
            out.push_str("ruby:\n");
            out.push_str(&format!("  path: {}\n", scalar(ruby.path.as_str())));
            out.push_str(&format!("  version: {}\n", scalar(&ruby.version)));
            out.push_str(&format!("  platform: {}\n", scalar(&ruby.platform)));
        }

        out.push_str("ruby_installer:\n");
        out.push_str(&format!(
            "  package_version: {}\n",
            scalar(self.ruby_installer.package_version)
        ));
        out.push_str(&format!(
            "  git_commit: {}\n",
            scalar(self.ruby_installer.git_commit)
        ));

        if let Some(cc) = &self.cc {
            out.push_str(&format!("cc: {}\n", scalar(cc)));
        }
        if let Some(sh) = &self.sh {
            out.push_str(&format!("sh: {}\n", scalar(sh)));
        }

        if let Some(msys2) = &self.msys2 {
            out.push_str("msys2:\n");
            out.push_str(&format!("  path: {}\n", scalar(msys2.path.as_str())));
            if let Some(title) = &msys2.title {
                out.push_str(&format!("  title: {}\n", scalar(title)));
            }
            if let Some(version) = &msys2.version {
                out.push_str(&format!("  version: {}\n", scalar(version)));
            }
        }

        out
    }
}

/// Resolve the ruby on the (MSYS2-enabled) PATH and ask it for its
/// version and platform.
fn probe_ruby(path: &str) -> Option<RubyInfo> {
    let ruby = process::resolve("ruby", path).ok()?;
    let ruby = Utf8PathBuf::from_path_buf(dunce::simplified(&ruby).to_path_buf()).ok()?;

    let output = Command::new(&ruby)
        .args(["-e", RUBY_INFO_SCRIPT])
        .env("PATH", path)
        .output()
        .ok()?;
    if !output.status.success() {
        debug!("ruby interpreter probe failed with {}", output.status);
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let mut lines = stdout.trim().lines();
    let version = lines.next()?.trim().to_string();
    let platform = lines.next()?.trim().to_string();
    if version.is_empty() {
        return None;
    }

    Some(RubyInfo {
        path: ruby,
        version,
        platform,
    })
}

/// First line of `<program> --version`, or absent when the program does
/// not resolve or fails.
fn probe_version_line(program: &str, path: &str) -> Option<String> {
    let executable = process::resolve(program, path).ok()?;
    let output = Command::new(executable)
        .arg("--version")
        .env("PATH", path)
        .output()
        .ok()?;
    if !output.status.success() {
        debug!("{program} --version failed with {}", output.status);
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
}

/// Format a value as a YAML scalar, double-quoting only when the plain
/// form would be ambiguous.
fn scalar(value: &str) -> String {
    let needs_quoting = value.is_empty()
        || resolves_as_non_string(value)
        || value.contains(": ")
        || value.ends_with(':')
        || value.contains('#')
        || value.contains('"')
        || value.starts_with([
            '!', '&', '*', '-', '?', '{', '}', '[', ']', ',', '>', '|', '%', '@', '`', '\'', ' ',
        ])
        || value.ends_with(' ');

    if needs_quoting {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Whether a plain scalar would resolve as something other than a string.
///
/// An all-digit manifest version or commit id must stay a string for
/// parsers, so anything YAML would read as a number, boolean or null gets
/// quoted.
fn resolves_as_non_string(value: &str) -> bool {
    if value.parse::<i64>().is_ok() || value.parse::<f64>().is_ok() {
        return true;
    }
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "null" | "~" | "yes" | "no" | "on" | "off"
    )
}
