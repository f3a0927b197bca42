//! Host tags used in gauge release artifact names and in the layout of
//! gauge's own build output.

/// Operating system tag, shared by release artifacts and build output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Linux
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
        }
    }
}

/// Architecture tag used in release artifact file names.
///
/// Distinct from [`ExecArch`]: released zips are named `x86_64`, while
/// gauge's build script puts locally built binaries under `amd64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadArch {
    X86_64,
    Arm64,
}

impl DownloadArch {
    pub fn current() -> Self {
        if cfg!(target_arch = "x86_64") {
            DownloadArch::X86_64
        } else {
            DownloadArch::Arm64
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            DownloadArch::X86_64 => "x86_64",
            DownloadArch::Arm64 => "arm64",
        }
    }
}

/// Architecture tag used by gauge's build script for its `bin/` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecArch {
    Amd64,
    Arm64,
}

impl ExecArch {
    pub fn current() -> Self {
        if cfg!(target_arch = "x86_64") {
            ExecArch::Amd64
        } else {
            ExecArch::Arm64
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ExecArch::Amd64 => "amd64",
            ExecArch::Arm64 => "arm64",
        }
    }
}
