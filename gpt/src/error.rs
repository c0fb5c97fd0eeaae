//! Error types for GPT synthesis
//!
//! Every variant describes a way the input descriptor can be invalid; the
//! builder emits no bytes once any of them fires. Unsupported hosts are
//! rejected at compile time instead (see the crate root).

use core::fmt;

/// Result type for GPT synthesis operations
pub type Result<T> = core::result::Result<T, GptError>;

/// Errors that can occur while building a GPT layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GptError {
    /// Block size is zero or not a multiple of 512
    InvalidBlockSize,

    /// Descriptor contains no partitions
    NoPartitions,

    /// Partition count does not fit in the header's 32-bit entry count
    TooManyPartitions,

    /// Disk too small to hold the GPT metadata plus one usable block
    DiskTooSmall,

    /// A partition starts below the first usable LBA
    StartingLbaBelowUsable,

    /// A partition ends above the last usable LBA
    EndingLbaAboveUsable,

    /// A partition's starting LBA is greater than its ending LBA
    StartingLbaAfterEndingLba,

    /// Two partitions occupy overlapping LBA ranges
    OverlappingPartitions,
}

impl fmt::Display for GptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlockSize => write!(f, "block size must be a non-zero multiple of 512"),
            Self::NoPartitions => write!(f, "must provide at least one partition"),
            Self::TooManyPartitions => write!(f, "too many partitions"),
            Self::DiskTooSmall => write!(f, "number of blocks too small"),
            Self::StartingLbaBelowUsable => {
                write!(f, "starting LBA less than first usable LBA")
            }
            Self::EndingLbaAboveUsable => {
                write!(f, "ending LBA greater than last usable LBA")
            }
            Self::StartingLbaAfterEndingLba => {
                write!(f, "starting LBA is greater than ending LBA")
            }
            Self::OverlappingPartitions => write!(f, "overlapping partitions"),
        }
    }
}

impl core::error::Error for GptError {}
