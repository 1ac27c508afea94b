//! Target platform identification for runtime downloads.

use std::{fmt, str::FromStr};

/// CPU architecture of the machine the bundle is built for.
///
/// Only the architectures that runtime vendors publish archives for are listed.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_portable::bundler::settings::Arch;
///
/// let arch = Arch::X86_64;
/// assert_eq!(arch.qualifier(), "x64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
    /// ARMv7 with hard-float (32-bit)
    Armv7,
}

impl Arch {
    /// Architecture of the running host.
    pub fn host() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "aarch64" => Arch::AArch64,
            "arm" => Arch::Armv7,
            _ => Arch::X86_64, // fallback
        }
    }

    /// Architecture component used in vendor archive names.
    pub fn qualifier(self) -> &'static str {
        match self {
            Arch::X86_64 => "x64",
            Arch::X86 => "x86",
            Arch::AArch64 => "arm64",
            Arch::Armv7 => "armv7l",
        }
    }
}

/// Operating system family of the bundle target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Microsoft Windows
    Windows,
    /// Linux distributions
    Linux,
    /// macOS
    Darwin,
}

impl Os {
    /// Operating system of the running host.
    pub fn host() -> Self {
        if cfg!(windows) {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::Darwin
        } else {
            Os::Linux
        }
    }

    fn qualifier(self) -> &'static str {
        match self {
            Os::Windows => "win",
            Os::Linux => "linux",
            Os::Darwin => "darwin",
        }
    }
}

/// Archive container used by a runtime download.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArchiveKind {
    /// `.zip`
    Zip,
    /// `.tar.gz`
    TarGz,
}

impl ArchiveKind {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::TarGz => "tar.gz",
        }
    }
}

/// Platform a bundle is assembled for, written `<os>-<arch>` (e.g. `win-x64`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Platform {
    /// Operating system family
    pub os: Os,
    /// CPU architecture
    pub arch: Arch,
}

impl Platform {
    /// Platform of the running host.
    pub fn host() -> Self {
        Self {
            os: Os::host(),
            arch: Arch::host(),
        }
    }

    /// Whether executables on this platform carry an `.exe` suffix.
    pub fn is_windows(self) -> bool {
        self.os == Os::Windows
    }

    /// Vendor archive format for this platform.
    pub fn archive_kind(self) -> ArchiveKind {
        if self.is_windows() {
            ArchiveKind::Zip
        } else {
            ArchiveKind::TarGz
        }
    }

    /// File name of an executable called `stem` on this platform.
    pub fn executable_name(self, stem: &str) -> String {
        if self.is_windows() {
            format!("{stem}.exe")
        } else {
            stem.to_string()
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.qualifier(), self.arch.qualifier())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (os, arch) = s
            .split_once('-')
            .ok_or_else(|| format!("platform `{s}` is not of the form <os>-<arch>"))?;

        let os = match os {
            "win" | "windows" => Os::Windows,
            "linux" => Os::Linux,
            "darwin" | "macos" => Os::Darwin,
            other => return Err(format!("unknown operating system `{other}`")),
        };
        let arch = match arch {
            "x64" | "x86_64" | "amd64" => Arch::X86_64,
            "x86" | "i686" => Arch::X86,
            "arm64" | "aarch64" => Arch::AArch64,
            "armv7l" | "armhf" => Arch::Armv7,
            other => return Err(format!("unknown architecture `{other}`")),
        };

        Ok(Self { os, arch })
    }
}
