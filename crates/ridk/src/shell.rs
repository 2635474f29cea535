use std::fmt;

use ridk_msys2::EnvDelta;
use serde::Serialize;

/// The shell dialects ridk can emit environment rewrites for.
///
/// One `EnvDelta` representation, one thin renderer per dialect; the
/// invoking shell evaluates the emitted lines to update its own
/// environment.
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, Serialize)]
pub enum Shell {
    #[default]
    Cmd,
    Powershell,
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cmd => write!(f, "cmd"),
            Self::Powershell => write!(f, "powershell"),
        }
    }
}

impl Shell {
    /// Render a delta as a script for this dialect.
    pub fn render(&self, delta: &EnvDelta) -> String {
        let mut script = String::new();
        match self {
            // `SET "VAR=value"` keeps cmd metacharacters like & ^ | in
            // the value from being interpreted when the line is evaluated.
            Self::Cmd => {
                if let Some(path) = &delta.path {
                    script.push_str(&format!("SET \"PATH={path}\"\n"));
                }
                if let Some(msystem) = &delta.msystem {
                    script.push_str(&format!("SET \"MSYSTEM={msystem}\"\n"));
                }
            }
            Self::Powershell => {
                if let Some(path) = &delta.path {
                    script.push_str(&format!("$env:PATH=\"{}\"\n", escape(path)));
                }
                if let Some(msystem) = &delta.msystem {
                    script.push_str(&format!("$env:MSYSTEM=\"{}\"\n", escape(msystem)));
                }
            }
        }
        script
    }
}

/// Escape a value for a double-quoted PowerShell string.
fn escape(value: &str) -> String {
    value
        .replace('`', "``")
        .replace('"', "`\"")
        .replace('$', "`$")
}
