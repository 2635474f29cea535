use std::io;

use clap::Args;

use crate::config::Config;
use crate::report::ToolchainReport;

#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Args)]
pub struct VersionArgs {
    /// Report format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Print the toolchain status report.
///
/// Diagnostics never fail for an optional absence: a missing MSYS2 tree,
/// manifest, compiler or shell just leaves its block out of the report.
pub fn version(config: &Config, args: VersionArgs) -> Result<()> {
    let report = ToolchainReport::collect(config);

    match args.format {
        OutputFormat::Yaml => print!("{}", report.to_yaml()),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &report)?;
            println!();
        }
    }

    Ok(())
}
