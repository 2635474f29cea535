use camino::Utf8PathBuf;
use fs_err as fs;
use regex::Regex;
use tracing::debug;

use crate::arch::Arch;

/// Drive-root directories the RubyInstaller ships MSYS2 into.
pub const DEFAULT_ROOTS: &[&str] = &["C:\\msys64", "C:\\msys32"];

/// Env var that pins discovery to exactly one root; when set, nothing
/// else is probed. Used by tests and CI images with relocated trees.
const ROOT_PIN: &str = "RIDK_MSYS2_ROOT";

/// An MSYS2 installation found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msys2Installation {
    pub root: Utf8PathBuf,
}

/// Title and version read from the installer's components manifest.
///
/// Either field can be absent on its own when the manifest exists but
/// lacks the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msys2Manifest {
    pub title: Option<String>,
    pub version: Option<String>,
}

impl Msys2Installation {
    pub fn at(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    /// Find an MSYS2 installation at the well-known locations.
    ///
    /// `RIDK_MSYS2_ROOT` pins discovery to a single root; otherwise
    /// `MSYS2_PATH` is consulted before the default drive roots.
    pub fn locate() -> Option<Self> {
        if let Ok(root) = std::env::var(ROOT_PIN) {
            let root = Utf8PathBuf::from(root);
            return root.is_dir().then(|| Self::at(root));
        }
        Self::locate_in(candidate_roots())
    }

    /// Find an MSYS2 installation among explicit candidate roots.
    pub fn locate_in<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Utf8PathBuf>,
    {
        for root in candidates {
            if root.is_dir() {
                debug!("found MSYS2 installation at {root}");
                return Some(Self::at(root));
            }
            debug!("no MSYS2 installation at {root}");
        }
        None
    }

    /// The MinGW tool directory for the given architecture.
    pub fn mingw_bin(&self, arch: Arch) -> Utf8PathBuf {
        self.root.join(arch.mingw_dir()).join("bin")
    }

    /// The MSYS userland tool directory.
    pub fn usr_bin(&self) -> Utf8PathBuf {
        self.root.join("usr").join("bin")
    }

    /// Read the distribution title and version from `components.xml`.
    ///
    /// Older bundled MSYS2 trees ship without the manifest; that is an
    /// expected absence, not an error.
    pub fn manifest(&self) -> Option<Msys2Manifest> {
        let path = self.root.join("components.xml");
        let xml = match fs::read_to_string(path.as_std_path()) {
            Ok(xml) => xml,
            Err(err) => {
                debug!("no components manifest at {path}: {err}");
                return None;
            }
        };

        Some(Msys2Manifest {
            title: tag_text(&xml, "Title"),
            version: tag_text(&xml, "Version"),
        })
    }
}

/// Extract the text of the first `<tag>...</tag>` occurrence.
///
/// The manifest is a Qt Installer Framework document of which ridk needs
/// exactly two leaf values, so a full XML model would be overkill.
fn tag_text(xml: &str, tag: &str) -> Option<String> {
    let re = Regex::new(&format!("<{tag}>([^<]*)</{tag}>")).ok()?;
    re.captures(xml)
        .map(|captures| captures[1].trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Candidate roots in probe order: the `MSYS2_PATH` override, then the
/// default drive-root locations.
pub fn candidate_roots() -> Vec<Utf8PathBuf> {
    let mut roots = Vec::new();
    if let Ok(value) = std::env::var("MSYS2_PATH")
        && !value.is_empty()
    {
        roots.push(Utf8PathBuf::from(value));
    }
    roots.extend(DEFAULT_ROOTS.iter().map(Utf8PathBuf::from));
    roots
}
