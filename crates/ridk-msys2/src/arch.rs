use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Error returned when an architecture override names something ridk's
/// MSYS2 toolchains do not cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("unknown MSYS2 architecture {arch:?} (expected x64 or x86)")]
pub struct UnsupportedArchError {
    pub arch: String,
}

/// The MSYS2/MinGW architectures ridk can activate.
///
/// Using an enum with no wildcard fallback ensures the compiler enforces
/// exhaustive handling at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
    X64,
    X86,
}

impl Arch {
    /// Detect the architecture of the running host.
    ///
    /// Checks the `RIDK_TEST_ARCH` env var first (for testing), then falls
    /// back to the compile-time pointer width.
    pub fn current() -> Result<Self, UnsupportedArchError> {
        if let Ok(arch) = std::env::var("RIDK_TEST_ARCH") {
            arch.parse()
        } else if cfg!(target_pointer_width = "64") {
            Ok(Self::X64)
        } else {
            Ok(Self::X86)
        }
    }

    /// The toolchain directory under the MSYS2 root, e.g. `mingw64`.
    pub fn mingw_dir(&self) -> &'static str {
        match self {
            Self::X64 => "mingw64",
            Self::X86 => "mingw32",
        }
    }

    /// The MSYSTEM value selecting this subsystem in an MSYS2 shell.
    pub fn msystem(&self) -> &'static str {
        match self {
            Self::X64 => "MINGW64",
            Self::X86 => "MINGW32",
        }
    }

    /// The pacman package group holding the MinGW compiler toolchain.
    pub fn toolchain_group(&self) -> &'static str {
        match self {
            Self::X64 => "mingw-w64-x86_64-toolchain",
            Self::X86 => "mingw-w64-i686-toolchain",
        }
    }
}

impl FromStr for Arch {
    type Err = UnsupportedArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x64" | "x86_64" | "mingw64" => Ok(Self::X64),
            "x86" | "i686" | "mingw32" => Ok(Self::X86),
            other => Err(UnsupportedArchError {
                arch: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X64 => write!(f, "x64"),
            Self::X86 => write!(f, "x86"),
        }
    }
}
