//! On-disk record layouts, UEFI 2.8 Section 5
//!
//! Each record serializes with an explicit field-by-field little-endian
//! writer; the fixed output sizes are enforced by the returned array
//! types. No in-memory reinterpretation is involved, so no packing or
//! padding concerns apply.

use crate::crc32::crc32;
use crate::types::{Guid, Lba, HEADER_SIZE, MBR_SIZE};

/// On-disk size of one MBR partition record.
pub const MBR_RECORD_SIZE: usize = 16;

/// Partition type byte marking the GPT protective partition.
pub const OS_TYPE_GPT_PROTECTIVE: u8 = 0xEE;

/// GPT header signature ("EFI PART").
pub const GPT_SIGNATURE: &[u8; 8] = b"EFI PART";

/// GPT revision 1.0, the bytes {0, 0, 1, 0} on disk.
pub const GPT_REVISION: u32 = 0x0001_0000;

/// One partition record inside the MBR, UEFI 2.8 Table 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MbrPartitionRecord {
    /// 0x80 marks a bootable legacy partition; always 0 here
    pub boot_indicator: u8,

    /// CHS address of the first sector
    pub starting_chs: [u8; 3],

    /// Partition type byte
    pub os_type: u8,

    /// CHS address of the last sector
    pub ending_chs: [u8; 3],

    /// First sector of the partition as a 32-bit LBA
    pub starting_lba: u32,

    /// Partition length in sectors
    pub size_in_lba: u32,
}

impl MbrPartitionRecord {
    /// Serialize to the 16-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; MBR_RECORD_SIZE] {
        let mut buf = [0u8; MBR_RECORD_SIZE];

        buf[0] = self.boot_indicator;
        buf[1..4].copy_from_slice(&self.starting_chs);
        buf[4] = self.os_type;
        buf[5..8].copy_from_slice(&self.ending_chs);
        buf[8..12].copy_from_slice(&self.starting_lba.to_le_bytes());
        buf[12..16].copy_from_slice(&self.size_in_lba.to_le_bytes());

        buf
    }
}

/// Protective MBR occupying LBA 0, UEFI 2.8 Table 19.
///
/// Keeps legacy tools from treating a GPT disk as unpartitioned: a single
/// record of type 0xEE spans as much of the disk as its 32-bit sector
/// count can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectiveMbr {
    /// Legacy disk signature; zero for the protective MBR
    pub unique_mbr_disk_signature: u32,

    /// Four partition records; only the first is populated
    pub partition_records: [MbrPartitionRecord; 4],
}

impl ProtectiveMbr {
    /// Build the protective MBR for a disk of `number_of_blocks` blocks.
    pub fn for_disk(number_of_blocks: u64) -> Self {
        let size_in_lba = match u32::try_from(number_of_blocks - 1) {
            Ok(size) => size,
            // UEFI prescribes 0xFFFFFFFF for oversized disks.
            Err(_) => 0x0fff_ffff,
        };

        Self {
            unique_mbr_disk_signature: 0,
            partition_records: [
                MbrPartitionRecord {
                    boot_indicator: 0,
                    starting_chs: [0x00, 0x02, 0x00],
                    os_type: OS_TYPE_GPT_PROTECTIVE,
                    // TODO derive from disk geometry.
                    ending_chs: [0xff, 0xff, 0xff],
                    starting_lba: 1,
                    size_in_lba,
                },
                MbrPartitionRecord::default(),
                MbrPartitionRecord::default(),
                MbrPartitionRecord::default(),
            ],
        }
    }

    /// Serialize to the full 512-byte sector.
    ///
    /// 440 bytes of boot code (zero), the disk signature, 2 reserved
    /// bytes, the four partition records, and the 0x55 0xAA signature.
    pub fn to_bytes(&self) -> [u8; MBR_SIZE] {
        let mut buf = [0u8; MBR_SIZE];

        buf[440..444].copy_from_slice(&self.unique_mbr_disk_signature.to_le_bytes());
        // buf[444..446] is the reserved pad, left zero.
        for (i, record) in self.partition_records.iter().enumerate() {
            let offset = 446 + i * MBR_RECORD_SIZE;
            buf[offset..offset + MBR_RECORD_SIZE].copy_from_slice(&record.to_bytes());
        }
        buf[510] = 0x55;
        buf[511] = 0xaa;

        buf
    }
}

/// GPT header, UEFI 2.8 Table 21.
///
/// Occupies the first 92 bytes of its block; the remainder of the block
/// is zero and not covered by `header_crc32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GptHeader {
    /// "EFI PART"
    pub signature: [u8; 8],

    /// Format revision, 0x00010000 for 1.0
    pub revision: u32,

    /// Serialized header size in bytes, always 92
    pub header_size: u32,

    /// CRC-32 of the header with this field zeroed during calculation
    pub header_crc32: u32,

    /// Must be zero
    pub reserved: u32,

    /// LBA holding this header copy
    pub my_lba: Lba,

    /// LBA holding the other header copy
    pub alternate_lba: Lba,

    /// First block available for partition content
    pub first_usable_lba: Lba,

    /// Last block available for partition content (inclusive)
    pub last_usable_lba: Lba,

    /// GUID identifying the disk
    pub disk_guid: Guid,

    /// First block of the partition entry array this header describes
    pub partition_entry_lba: Lba,

    /// Number of entries in the partition entry array
    pub number_of_partition_entries: u32,

    /// Size of one partition entry, always 128
    pub size_of_partition_entry: u32,

    /// CRC-32 of the partition entry array
    pub partition_entry_checksum: u32,
}

impl GptHeader {
    /// Serialize to the 92-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[0..8].copy_from_slice(&self.signature);
        buf[8..12].copy_from_slice(&self.revision.to_le_bytes());
        buf[12..16].copy_from_slice(&self.header_size.to_le_bytes());
        buf[16..20].copy_from_slice(&self.header_crc32.to_le_bytes());
        buf[20..24].copy_from_slice(&self.reserved.to_le_bytes());
        buf[24..32].copy_from_slice(&self.my_lba.to_le_bytes());
        buf[32..40].copy_from_slice(&self.alternate_lba.to_le_bytes());
        buf[40..48].copy_from_slice(&self.first_usable_lba.to_le_bytes());
        buf[48..56].copy_from_slice(&self.last_usable_lba.to_le_bytes());
        buf[56..72].copy_from_slice(&self.disk_guid);
        buf[72..80].copy_from_slice(&self.partition_entry_lba.to_le_bytes());
        buf[80..84].copy_from_slice(&self.number_of_partition_entries.to_le_bytes());
        buf[84..88].copy_from_slice(&self.size_of_partition_entry.to_le_bytes());
        buf[88..92].copy_from_slice(&self.partition_entry_checksum.to_le_bytes());

        buf
    }

    /// Store the self-referential header checksum.
    ///
    /// The checksum covers the 92 serialized bytes with the checksum
    /// field itself zeroed, never the zero padding of the containing
    /// block.
    pub fn update_header_crc32(&mut self) {
        self.header_crc32 = 0;
        self.header_crc32 = crc32(&self.to_bytes());
    }
}
