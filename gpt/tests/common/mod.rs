//! Common helpers for building test descriptors and picking apart blobs

use gpt::{GptDescriptor, GptPartitionEntry};

/// Default block size used by most tests.
pub const BLOCK_SIZE: u64 = 512;

/// Partition entry with zero GUIDs, zero attributes and an empty name.
pub fn partition(starting_lba: u64, ending_lba: u64) -> GptPartitionEntry {
    GptPartitionEntry {
        partition_type_guid: [0; 16],
        unique_partition_guid: [0; 16],
        starting_lba,
        ending_lba,
        attributes: 0,
        partition_name: [0; 36],
    }
}

/// Descriptor over 512-byte blocks with a zero disk GUID.
pub fn descriptor(number_of_blocks: u64, partitions: Vec<GptPartitionEntry>) -> GptDescriptor {
    GptDescriptor {
        block_size: BLOCK_SIZE,
        number_of_blocks,
        disk_guid: [0; 16],
        partitions,
    }
}

/// A 2048-block disk with a single partition spanning the usable range's
/// interior.
#[allow(dead_code)]
pub fn minimal_descriptor() -> GptDescriptor {
    descriptor(2048, vec![partition(34, 2014)])
}

#[allow(dead_code)]
pub fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

#[allow(dead_code)]
pub fn read_u64(data: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes(data[offset..offset + 8].try_into().unwrap())
}
