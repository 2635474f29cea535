use std::process::ExitCode;

use clap::Args;
use tracing::{debug, warn};

use crate::config::Config;
use crate::process;
use ridk_msys2::Arch;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("unknown component {component:?}")]
    #[diagnostic(help("known components: msys2, mingw"))]
    UnknownComponent { component: String },
    #[error("unknown action {action:?} for component {component:?}")]
    #[diagnostic(help("known actions for msys2: update, pacman_update"))]
    UnknownAction { component: String, action: String },
    #[error(transparent)]
    #[diagnostic(transparent)]
    ProcessError(#[from] process::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct InstallArgs {
    /// Toolchain component to install or update, e.g. `msys2`
    pub component: String,

    /// Component-specific action, e.g. `pacman_update`
    pub action: Option<String>,
}

/// One planned pacman invocation.
#[derive(Debug)]
struct PacmanStep {
    args: Vec<String>,
}

/// Install or update a toolchain component by driving pacman.
///
/// pacman's own exit code is forwarded on failure, unwrapped, so callers
/// see the real result of the package operation.
pub fn install(config: &Config, args: InstallArgs) -> Result<ExitCode> {
    let steps = plan(&args, config.arch)?;

    let path = config.enabled_path();
    let pacman = process::resolve("pacman", &path)?;
    let env = [
        ("PATH", path.clone()),
        ("MSYSTEM", config.arch.msystem().to_string()),
    ];

    for step in steps {
        debug!("pacman {}", step.args.join(" "));
        let status = process::run_streamed(&pacman, &step.args, &env)?;
        if !status.success() {
            warn!("pacman exited with {status}");
            return Ok(process::forward_status(status));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Map a component/action pair onto pacman invocations.
fn plan(args: &InstallArgs, arch: Arch) -> Result<Vec<PacmanStep>> {
    let step = |argv: &[&str]| PacmanStep {
        args: argv.iter().map(|s| s.to_string()).collect(),
    };

    match (args.component.as_str(), args.action.as_deref()) {
        // Refresh the sync database, then upgrade everything.
        ("msys2", Some("pacman_update")) => Ok(vec![
            step(&["-Sy", "--noconfirm"]),
            step(&["-Su", "--noconfirm"]),
        ]),
        ("msys2", None | Some("update")) => Ok(vec![step(&["-Syu", "--noconfirm"])]),
        ("msys2", Some(action)) => Err(Error::UnknownAction {
            component: args.component.clone(),
            action: action.to_string(),
        }),
        ("mingw", None) => Ok(vec![step(&[
            "-S",
            "--needed",
            "--noconfirm",
            arch.toolchain_group(),
        ])]),
        ("mingw", Some(action)) => Err(Error::UnknownAction {
            component: args.component.clone(),
            action: action.to_string(),
        }),
        (component, _) => Err(Error::UnknownComponent {
            component: component.to_string(),
        }),
    }
}
