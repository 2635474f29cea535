use clap::Args;
use ridk_msys2::EnvDelta;
use tracing::debug;

use crate::config::Config;
use crate::shell::Shell;

#[derive(Args)]
pub struct DisableArgs {
    /// Shell dialect to emit the environment rewrite for.
    #[arg(value_enum, default_value_t)]
    pub shell: Shell,
}

/// Emit the script that strips the MSYS2 directories from the invoking
/// shell's PATH and clears MSYSTEM.
///
/// Without an installation there is nothing to strip, but MSYSTEM is
/// still cleared so a stale architecture tag never survives.
pub fn disable(config: &Config, args: DisableArgs) {
    let delta = match &config.installation {
        Some(installation) => {
            debug!("disabling MSYS2 at {}", installation.root);
            ridk_msys2::env::disable(&config.path, &installation.root)
        }
        None => EnvDelta {
            path: None,
            msystem: Some(String::new()),
        },
    };

    print!("{}", args.shell.render(&delta));
}
