use std::process::ExitCode;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod config;
pub mod process;
pub mod report;
pub mod shell;

use commands::disable::DisableArgs;
use commands::enable::EnableArgs;
use commands::exec::ExecArgs;
use commands::install::InstallArgs;
use commands::version::VersionArgs;
use config::Config;

#[derive(Parser)]
#[command(name = "ridk", version, about = "MSYS2/MinGW toolchain helper for Ruby on Windows", long_about = None)]
struct Cli {
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Install or update MSYS2 toolchain components")]
    Install(InstallArgs),
    #[command(about = "Add the MSYS2 tool directories to the shell environment")]
    Enable(EnableArgs),
    #[command(about = "Remove the MSYS2 tool directories from the shell environment")]
    Disable(DisableArgs),
    #[command(about = "Run a command with the MSYS2 tools on PATH")]
    Exec(ExecArgs),
    #[command(about = "Print a toolchain status report")]
    Version(VersionArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> miette::Result<ExitCode> {
    let config = Config::from_env()?;

    match command {
        Commands::Install(args) => Ok(commands::install::install(&config, args)?),
        Commands::Enable(args) => {
            commands::enable::enable(&config, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Disable(args) => {
            commands::disable::disable(&config, args);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Exec(args) => Ok(commands::exec::exec(&config, args)?),
        Commands::Version(args) => {
            commands::version::version(&config, args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
