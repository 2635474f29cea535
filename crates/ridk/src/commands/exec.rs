use std::process::ExitCode;

use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::process;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ProcessError(#[from] process::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct ExecArgs {
    /// What to run with the MSYS2 tools available, e.g. `pacman -h`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true, value_names = ["COMMAND", "ARGS"])]
    args: Vec<String>,
}

/// Run a command with the MSYS2 tool directories on PATH, forwarding its
/// stdio and exit code untouched.
pub fn exec(config: &Config, args: ExecArgs) -> Result<ExitCode> {
    let (program, program_args) = args.args.split_first().unwrap();

    let path = config.enabled_path();
    let resolved = process::resolve(program, &path)?;
    debug!("exec {} via {}", program, resolved.display());

    let mut env = vec![("PATH", path.clone())];
    if config.installation.is_some() {
        env.push(("MSYSTEM", config.arch.msystem().to_string()));
    }

    let status = process::run_streamed(&resolved, program_args, &env)?;
    Ok(process::forward_status(status))
}
