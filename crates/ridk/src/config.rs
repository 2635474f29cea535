use ridk_msys2::{Arch, Msys2Installation};
use tracing::debug;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ArchError(#[from] ridk_msys2::arch::UnsupportedArchError),
}

/// Snapshot of the environment taken once at startup.
///
/// Commands compute against this value instead of reading the process
/// environment piecemeal, so the PATH/MSYSTEM rewrites stay pure and
/// independently testable.
#[derive(Debug)]
pub struct Config {
    /// PATH as the parent shell handed it to us.
    pub path: String,
    pub arch: Arch,
    pub installation: Option<Msys2Installation>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let path = std::env::var("PATH").unwrap_or_default();
        let arch = Arch::current()?;
        let installation = Msys2Installation::locate();
        if installation.is_none() {
            debug!("no MSYS2 installation located");
        }

        Ok(Self {
            path,
            arch,
            installation,
        })
    }

    /// PATH with the MSYS2 tool directories prepended, for child
    /// processes. Falls back to the unmodified PATH when no installation
    /// is present.
    pub fn enabled_path(&self) -> String {
        if let Some(installation) = &self.installation
            && let Ok(delta) = ridk_msys2::env::enable(&self.path, installation, self.arch)
            && let Some(path) = delta.path
        {
            return path;
        }
        self.path.clone()
    }
}
