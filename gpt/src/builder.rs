//! GPT construction
//!
//! Validates a descriptor and assembles the two byte blobs that bracket a
//! GPT disk image: [protective MBR | primary header | entry array] at the
//! front of the device and [entry array copy | backup header] at the end.

use alloc::vec;
use alloc::vec::Vec;

use crate::crc32::crc32;
use crate::error::{GptError, Result};
use crate::records::{GptHeader, ProtectiveMbr, GPT_REVISION, GPT_SIGNATURE};
use crate::types::{
    GptData, GptDescriptor, ENTRY_SIZE, HEADER_SIZE, MBR_SIZE, MIN_BLOCK_SIZE,
};

/// LBA layout derived from a validated descriptor.
struct Layout {
    /// Blocks occupied by one copy of the partition entry array
    partition_entry_blocks: u64,
    first_usable_lba: u64,
    last_usable_lba: u64,
}

fn validate(descriptor: &GptDescriptor) -> Result<Layout> {
    if descriptor.block_size == 0 || descriptor.block_size % MIN_BLOCK_SIZE != 0 {
        return Err(GptError::InvalidBlockSize);
    }
    if descriptor.partitions.is_empty() {
        return Err(GptError::NoPartitions);
    }
    if descriptor.partitions.len() > u32::MAX as usize {
        return Err(GptError::TooManyPartitions);
    }

    // Blocks (ceiling) needed for one copy of the entry array, then the
    // full metadata footprint: MBR, two headers, two array copies. At
    // least one usable block must remain.
    let entry_bytes = descriptor.partitions.len() as u64 * ENTRY_SIZE as u64;
    let partition_entry_blocks =
        (entry_bytes + descriptor.block_size - 1) / descriptor.block_size;
    let gpt_blocks = 3 + partition_entry_blocks * 2;
    if descriptor.number_of_blocks < gpt_blocks + 1 {
        return Err(GptError::DiskTooSmall);
    }

    let first_usable_lba = 2 + partition_entry_blocks;
    let last_usable_lba = descriptor.number_of_blocks - partition_entry_blocks - 2;

    for (index, partition) in descriptor.partitions.iter().enumerate() {
        if partition.starting_lba < first_usable_lba {
            return Err(GptError::StartingLbaBelowUsable);
        } else if partition.ending_lba > last_usable_lba {
            return Err(GptError::EndingLbaAboveUsable);
        } else if partition.starting_lba > partition.ending_lba {
            return Err(GptError::StartingLbaAfterEndingLba);
        }

        // Endpoint containment against every later entry. A later range
        // nested strictly inside this one slips through.
        for other in &descriptor.partitions[index + 1..] {
            let start_inside = partition.starting_lba >= other.starting_lba
                && partition.starting_lba <= other.ending_lba;
            let end_inside = partition.ending_lba >= other.starting_lba
                && partition.ending_lba <= other.ending_lba;
            if start_inside || end_inside {
                return Err(GptError::OverlappingPartitions);
            }
        }
    }

    Ok(Layout {
        partition_entry_blocks,
        first_usable_lba,
        last_usable_lba,
    })
}

/// Construct the raw GPT data for the described disk.
///
/// Pure function: equal descriptors produce byte-identical blobs, and the
/// caller owns the result. The `header` blob spans
/// `(2 + partition_entry_blocks) * block_size` bytes, the `footer` blob
/// `(1 + partition_entry_blocks) * block_size`; all bytes between the
/// placed records are zero.
pub fn make_gpt(descriptor: &GptDescriptor) -> Result<GptData> {
    let layout = validate(descriptor)?;

    // Serialize the entry array once; both copies on disk and both header
    // checksums derive from these bytes.
    let mut entry_array = Vec::with_capacity(descriptor.partitions.len() * ENTRY_SIZE);
    for partition in &descriptor.partitions {
        entry_array.extend_from_slice(&partition.to_bytes());
    }
    let partition_entry_checksum = crc32(&entry_array);

    let mbr = ProtectiveMbr::for_disk(descriptor.number_of_blocks);

    let mut primary = GptHeader {
        signature: *GPT_SIGNATURE,
        revision: GPT_REVISION,
        header_size: HEADER_SIZE as u32,
        header_crc32: 0,
        reserved: 0,
        my_lba: 1,
        alternate_lba: descriptor.number_of_blocks - 1,
        first_usable_lba: layout.first_usable_lba,
        last_usable_lba: layout.last_usable_lba,
        disk_guid: descriptor.disk_guid,
        partition_entry_lba: 2,
        number_of_partition_entries: descriptor.partitions.len() as u32,
        size_of_partition_entry: ENTRY_SIZE as u32,
        partition_entry_checksum,
    };
    primary.update_header_crc32();

    // The backup header swaps my_lba/alternate_lba and points at the
    // backup array copy just below it.
    let mut backup = GptHeader {
        my_lba: descriptor.number_of_blocks - 1,
        alternate_lba: 1,
        partition_entry_lba: descriptor.number_of_blocks - 1 - layout.partition_entry_blocks,
        ..primary
    };
    backup.update_header_crc32();

    let block_size = descriptor.block_size as usize;
    let entry_blocks = layout.partition_entry_blocks as usize;

    let mut header = vec![0u8; (2 + entry_blocks) * block_size];
    header[..MBR_SIZE].copy_from_slice(&mbr.to_bytes());
    header[block_size..block_size + HEADER_SIZE].copy_from_slice(&primary.to_bytes());
    header[2 * block_size..2 * block_size + entry_array.len()].copy_from_slice(&entry_array);

    let mut footer = vec![0u8; (1 + entry_blocks) * block_size];
    footer[..entry_array.len()].copy_from_slice(&entry_array);
    footer[entry_blocks * block_size..entry_blocks * block_size + HEADER_SIZE]
        .copy_from_slice(&backup.to_bytes());

    Ok(GptData { header, footer })
}
