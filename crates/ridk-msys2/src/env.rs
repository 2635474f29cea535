use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::debug;

use crate::arch::Arch;
use crate::installation::Msys2Installation;

/// Separator between PATH entries.
pub const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("no MSYS2 installation at {root}")]
    #[diagnostic(help("run the installer with the MSYS2 component, or point MSYS2_PATH at an existing tree"))]
    ToolchainNotFound { root: Utf8PathBuf },
}

type Result<T> = miette::Result<T, Error>;

/// The environment rewrite produced by `enable`/`disable`.
///
/// A child process cannot mutate its parent shell's variables, so the
/// rewrite is computed here as a plain value and rendered at the boundary
/// as a script for the invoking shell to evaluate. `None` means the
/// variable keeps its current value; `Some("")` for `msystem` clears the
/// variable to an observably-empty value rather than unsetting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvDelta {
    pub path: Option<String>,
    pub msystem: Option<String>,
}

/// Compute the PATH/MSYSTEM rewrite that activates an MSYS2 toolchain.
///
/// Prepends the MinGW and MSYS userland tool directories to `current_path`
/// and selects the matching MSYSTEM. Directories already on the PATH are
/// not added again, so enabling twice is a no-op for PATH.
pub fn enable(
    current_path: &str,
    installation: &Msys2Installation,
    arch: Arch,
) -> Result<EnvDelta> {
    if !installation.root.is_dir() {
        return Err(Error::ToolchainNotFound {
            root: installation.root.clone(),
        });
    }

    let additions = [installation.mingw_bin(arch), installation.usr_bin()];
    let missing: Vec<&str> = additions
        .iter()
        .filter(|dir| !contains_segment(current_path, dir))
        .map(|dir| dir.as_str())
        .collect();

    let path = if missing.is_empty() {
        debug!("MSYS2 tool directories already on PATH");
        None
    } else {
        let mut value = missing.join(&PATH_SEPARATOR.to_string());
        if !current_path.is_empty() {
            value.push(PATH_SEPARATOR);
            value.push_str(current_path);
        }
        Some(value)
    };

    Ok(EnvDelta {
        path,
        msystem: Some(arch.msystem().to_string()),
    })
}

/// Compute the rewrite that deactivates an MSYS2 toolchain.
///
/// Drops every PATH segment that is the root or lies beneath it, and
/// clears MSYSTEM to the empty string.
pub fn disable(current_path: &str, root: &Utf8Path) -> EnvDelta {
    let root_key = normalize(root.as_str());
    let prefix = format!("{root_key}/");

    let kept: Vec<&str> = current_path
        .split(PATH_SEPARATOR)
        .filter(|segment| {
            let key = normalize(segment);
            key != root_key && !key.starts_with(&prefix)
        })
        .collect();

    let dropped = current_path.split(PATH_SEPARATOR).count() - kept.len();
    let path = if dropped == 0 {
        None
    } else {
        debug!("removing {dropped} MSYS2 PATH entries under {root}");
        Some(kept.join(&PATH_SEPARATOR.to_string()))
    };

    EnvDelta {
        path,
        msystem: Some(String::new()),
    }
}

fn contains_segment(path: &str, dir: &Utf8Path) -> bool {
    let key = normalize(dir.as_str());
    path.split(PATH_SEPARATOR)
        .any(|segment| normalize(segment) == key)
}

/// Normalized comparison key for a PATH segment.
///
/// Windows paths compare case-insensitively, segments may be quoted, and
/// either slash direction denotes the same directory.
fn normalize(segment: &str) -> String {
    segment
        .trim()
        .trim_matches('"')
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_lowercase()
}
