use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::shell::Shell;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("no MSYS2 installation found")]
    #[diagnostic(help(
        "checked RIDK_MSYS2_ROOT, MSYS2_PATH and the default installation roots; \
         install MSYS2 or point MSYS2_PATH at an existing tree"
    ))]
    ToolchainNotFound,
    #[error(transparent)]
    #[diagnostic(transparent)]
    EnvError(#[from] ridk_msys2::env::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct EnableArgs {
    /// Shell dialect to emit the environment rewrite for.
    #[arg(value_enum, default_value_t)]
    pub shell: Shell,
}

/// Emit the script that puts the MSYS2 tool directories on the invoking
/// shell's PATH and selects the matching MSYSTEM.
pub fn enable(config: &Config, args: EnableArgs) -> Result<()> {
    let installation = config
        .installation
        .as_ref()
        .ok_or(Error::ToolchainNotFound)?;

    let delta = ridk_msys2::env::enable(&config.path, installation, config.arch)?;
    debug!("enabling MSYS2 at {} for {}", installation.root, args.shell);
    print!("{}", args.shell.render(&delta));
    Ok(())
}
