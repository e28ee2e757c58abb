//! Target width/alignment metrics.
//!
//! Per-target metric tables are input data supplied by the surrounding
//! compiler driver; the universe only selects a row by (OS, architecture)
//! and reads widths from it. All widths and alignments are in bits.

use std::fmt;

use thiserror::Error;

/// Target operating system.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::Darwin => write!(f, "darwin"),
            Os::Windows => write!(f, "windows"),
        }
    }
}

/// Target architecture.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Arm64,
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86 => write!(f, "x86"),
            Arch::X86_64 => write!(f, "x86_64"),
            Arch::Arm => write!(f, "arm"),
            Arch::Arm64 => write!(f, "arm64"),
        }
    }
}

/// Width and alignment of one metric category, in bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TargetMetrics {
    pub width: u32,
    pub align: u32,
}

impl TargetMetrics {
    const fn bits(width: u32) -> Self {
        TargetMetrics {
            width,
            align: width,
        }
    }
}

/// The metric categories the type universe reads.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TargetInfo {
    /// Pointer width/alignment (also rawptr, intptr, uintptr, functions).
    pub pointer: TargetMetrics,
    /// Platform-sized `int`/`uint` width/alignment.
    pub int: TargetMetrics,
}

/// Error selecting a metrics row.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("unsupported os & arch combination: {os}/{arch}")]
pub struct UnsupportedTarget {
    pub os: Os,
    pub arch: Arch,
}

/// Select the metrics row for an (OS, architecture) pair.
pub fn target_metrics(os: Os, arch: Arch) -> Result<TargetInfo, UnsupportedTarget> {
    let info = match (os, arch) {
        (Os::Linux | Os::Darwin, Arch::X86_64 | Arch::Arm64) => TargetInfo {
            pointer: TargetMetrics::bits(64),
            int: TargetMetrics::bits(64),
        },
        (Os::Linux, Arch::X86 | Arch::Arm) => TargetInfo {
            pointer: TargetMetrics::bits(32),
            int: TargetMetrics::bits(32),
        },
        _ => return Err(UnsupportedTarget { os, arch }),
    };
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_targets_supported() {
        let info = target_metrics(Os::Linux, Arch::X86_64).unwrap();
        assert_eq!(info.pointer.width, 64);
        assert_eq!(info.int.width, 64);

        let info = target_metrics(Os::Linux, Arch::X86).unwrap();
        assert_eq!(info.pointer.width, 32);
    }

    #[test]
    fn windows_arm_unsupported() {
        let err = target_metrics(Os::Windows, Arch::Arm).unwrap_err();
        assert_eq!(err.os, Os::Windows);
        assert_eq!(err.arch, Arch::Arm);
    }
}
