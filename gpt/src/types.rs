//! Core data model for GPT synthesis

use alloc::vec::Vec;

/// A GUID as 16 raw bytes, kept in the order they appear on disk.
///
/// The textual hex-with-dashes form is a caller concern; this crate never
/// reorders or interprets the bytes.
pub type Guid = [u8; 16];

/// Logical block address (0-based index into the device's blocks).
pub type Lba = u64;

/// On-disk size of one partition entry.
pub const ENTRY_SIZE: usize = 128;

/// Serialized GPT header size; the rest of its block is zero.
pub const HEADER_SIZE: usize = 92;

/// Protective MBR size (one 512-byte sector).
pub const MBR_SIZE: usize = 512;

/// Block sizes must be a non-zero multiple of this.
pub const MIN_BLOCK_SIZE: u64 = 512;

/// A single partition entry, UEFI 2.8 Table 22.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GptPartitionEntry {
    /// Partition type GUID
    pub partition_type_guid: Guid,

    /// Unique GUID of this partition
    pub unique_partition_guid: Guid,

    /// First block of the partition (inclusive)
    pub starting_lba: Lba,

    /// Last block of the partition (inclusive)
    pub ending_lba: Lba,

    /// Attribute bits, passed through opaquely
    pub attributes: u64,

    /// Partition name as UTF-16LE code units, zero padded
    pub partition_name: [u16; 36],
}

impl GptPartitionEntry {
    /// Serialize to the 128-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut buf = [0u8; ENTRY_SIZE];

        buf[0..16].copy_from_slice(&self.partition_type_guid);
        buf[16..32].copy_from_slice(&self.unique_partition_guid);
        buf[32..40].copy_from_slice(&self.starting_lba.to_le_bytes());
        buf[40..48].copy_from_slice(&self.ending_lba.to_le_bytes());
        buf[48..56].copy_from_slice(&self.attributes.to_le_bytes());

        for (i, unit) in self.partition_name.iter().enumerate() {
            let offset = 56 + i * 2;
            buf[offset..offset + 2].copy_from_slice(&unit.to_le_bytes());
        }

        buf
    }
}

/// Describes a GPT disk to be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GptDescriptor {
    /// Device block size in bytes (non-zero multiple of 512)
    pub block_size: u64,

    /// Total number of blocks on the device
    pub number_of_blocks: u64,

    /// GUID identifying the disk
    pub disk_guid: Guid,

    /// Partition entries, in table order
    pub partitions: Vec<GptPartitionEntry>,
}

/// The raw bytes of a GPT device.
///
/// `header` belongs at offset 0 of the image, `footer` flush against its
/// end; their sizes fix their placement relative to the device size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GptData {
    /// Protective MBR, primary GPT header, primary partition entry array
    pub header: Vec<u8>,

    /// Backup partition entry array, backup GPT header
    pub footer: Vec<u8>,
}
