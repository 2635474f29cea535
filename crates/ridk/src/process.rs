use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode, ExitStatus};

use tracing::debug;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("could not find `{program}` on PATH")]
    #[diagnostic(help("run `ridk install` to provision the MSYS2 toolchain"))]
    ExecutableNotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    #[error("failed to start `{program}`")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

type Result<T> = miette::Result<T, Error>;

/// Resolve `program` against an explicit PATH value the way the OS would.
///
/// Resolving up front turns a missing executable into a diagnostic before
/// anything is spawned.
pub fn resolve(program: &str, path: &str) -> Result<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    which::which_in(program, Some(path), cwd).map_err(|source| Error::ExecutableNotFound {
        program: program.to_string(),
        source,
    })
}

/// Run a child process with inherited stdio and the given environment
/// overrides, blocking until it exits. The child's output is not captured
/// or rewritten, and no timeout is imposed.
pub fn run_streamed(
    program: &Path,
    args: &[String],
    env: &[(&str, String)],
) -> Result<ExitStatus> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    for (var, value) in env {
        cmd.env(var, value);
    }

    debug!("running {} with {} args", program.display(), args.len());
    cmd.status().map_err(|source| Error::SpawnFailed {
        program: program.display().to_string(),
        source,
    })
}

/// Map a child exit status onto our own exit code, so failures propagate
/// unwrapped.
pub fn forward_status(status: ExitStatus) -> ExitCode {
    ExitCode::from(u8::try_from(status.code().unwrap_or(1)).unwrap_or(1))
}
