//! Descriptor document loading
//!
//! Parses the JSON description of a disk into a `GptDescriptor`:
//!
//! ```json
//! {
//!     "block_size": 512,
//!     "number_of_blocks": 2048,
//!     "disk_guid": "C12A7328-F81F-11D2-BA4B-00A0C93EC93B",
//!     "partitions": [
//!         {
//!             "partition_type_guid": "C12A7328-F81F-11D2-BA4B-00A0C93EC93B",
//!             "unique_partition_guid": "ACBD1871-632C-4465-B5A6-2A7B022E20C5",
//!             "starting_lba": 34,
//!             "ending_lba": 2014,
//!             "attributes": 0,
//!             "partition_name": "EFI system partition"
//!         }
//!     ]
//! }
//! ```
//!
//! GUIDs keep the textual byte order: each hex pair becomes one byte as
//! written, with no endianness shuffling.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use gpt::{GptDescriptor, GptPartitionEntry, Guid};

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    block_size: u64,
    number_of_blocks: u64,
    disk_guid: String,
    partitions: Vec<RawPartition>,
}

#[derive(Debug, Deserialize)]
struct RawPartition {
    partition_type_guid: String,
    unique_partition_guid: String,
    starting_lba: u64,
    ending_lba: u64,
    attributes: u64,
    partition_name: String,
}

/// Parse a JSON descriptor document.
pub fn load(document: &str) -> Result<GptDescriptor> {
    let raw: RawDescriptor = serde_json::from_str(document).context("malformed JSON")?;

    let mut partitions = Vec::with_capacity(raw.partitions.len());
    for (index, partition) in raw.partitions.iter().enumerate() {
        partitions
            .push(convert_partition(partition).with_context(|| format!("partition {index}"))?);
    }

    Ok(GptDescriptor {
        block_size: raw.block_size,
        number_of_blocks: raw.number_of_blocks,
        disk_guid: parse_guid(&raw.disk_guid).context("disk_guid")?,
        partitions,
    })
}

fn convert_partition(raw: &RawPartition) -> Result<GptPartitionEntry> {
    Ok(GptPartitionEntry {
        partition_type_guid: parse_guid(&raw.partition_type_guid)
            .context("partition_type_guid")?,
        unique_partition_guid: parse_guid(&raw.unique_partition_guid)
            .context("unique_partition_guid")?,
        starting_lba: raw.starting_lba,
        ending_lba: raw.ending_lba,
        attributes: raw.attributes,
        partition_name: encode_name(&raw.partition_name)?,
    })
}

/// Parse the 8-4-4-4-12 hex text form of a GUID.
pub fn parse_guid(text: &str) -> Result<Guid> {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let bytes = text.as_bytes();
    if bytes.len() != 36 {
        bail!("not a GUID: {text:?}");
    }

    let mut guid: Guid = [0; 16];
    let mut pos = 0;
    let mut out = 0;
    for (index, group) in GROUPS.iter().enumerate() {
        if index > 0 {
            if bytes[pos] != b'-' {
                bail!("expected dash separator: {text:?}");
            }
            pos += 1;
        }
        for _ in 0..group / 2 {
            guid[out] = hex_digit(bytes[pos])? << 4 | hex_digit(bytes[pos + 1])?;
            out += 1;
            pos += 2;
        }
    }

    Ok(guid)
}

fn hex_digit(byte: u8) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => bail!("not a hex digit: {:?}", byte as char),
    }
}

/// Encode a partition name as zero-padded UTF-16 code units.
///
/// Surrogate pairs count as two units; anything past 36 units does not
/// fit in a partition entry and is rejected.
fn encode_name(name: &str) -> Result<[u16; 36]> {
    let mut units = [0u16; 36];
    let mut count = 0;
    for unit in name.encode_utf16() {
        if count == units.len() {
            bail!("partition name too long: {name:?}");
        }
        units[count] = unit;
        count += 1;
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guid_byte_order() {
        let guid = parse_guid("00112233-4455-6677-8899-AABBCCDDEEFF").unwrap();
        assert_eq!(
            guid,
            [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
             0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]
        );
    }

    #[test]
    fn test_parse_guid_mixed_case() {
        let lower = parse_guid("c12a7328-f81f-11d2-ba4b-00a0c93ec93b").unwrap();
        let upper = parse_guid("C12A7328-F81F-11D2-BA4B-00A0C93EC93B").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_guid_rejects_bad_input() {
        assert!(parse_guid("").is_err());
        assert!(parse_guid("C12A7328").is_err());
        assert!(parse_guid("C12A7328-F81F-11D2-BA4B-00A0C93EC93").is_err()); // short
        assert!(parse_guid("C12A7328 F81F-11D2-BA4B-00A0C93EC93B").is_err()); // no dash
        assert!(parse_guid("C12A7328-F81F-11D2-BA4B-00A0C93EC93G").is_err()); // non-hex
    }

    #[test]
    fn test_encode_name_pads_with_zeros() {
        let units = encode_name("boot").unwrap();
        assert_eq!(&units[..4], &[b'b' as u16, b'o' as u16, b'o' as u16, b't' as u16]);
        assert!(units[4..].iter().all(|&u| u == 0));
    }

    #[test]
    fn test_encode_name_length_limit() {
        assert!(encode_name(&"x".repeat(36)).is_ok());
        assert!(encode_name(&"x".repeat(37)).is_err());
    }

    #[test]
    fn test_encode_name_counts_surrogate_pairs() {
        // U+1D11E takes two UTF-16 code units.
        let units = encode_name("𝄞").unwrap();
        assert_eq!(units[0], 0xd834);
        assert_eq!(units[1], 0xdd1e);

        // 18 pairs fill the name exactly; one more spills past the limit.
        assert!(encode_name(&"𝄞".repeat(18)).is_ok());
        assert!(encode_name(&"𝄞".repeat(19)).is_err());
    }

    #[test]
    fn test_load_full_document() {
        let document = r#"{
            "block_size": 512,
            "number_of_blocks": 2048,
            "disk_guid": "00000000-0000-0000-0000-000000000001",
            "partitions": [
                {
                    "partition_type_guid": "C12A7328-F81F-11D2-BA4B-00A0C93EC93B",
                    "unique_partition_guid": "ACBD1871-632C-4465-B5A6-2A7B022E20C5",
                    "starting_lba": 34,
                    "ending_lba": 2014,
                    "attributes": 0,
                    "partition_name": "EFI system partition"
                }
            ]
        }"#;

        let descriptor = load(document).unwrap();
        assert_eq!(descriptor.block_size, 512);
        assert_eq!(descriptor.number_of_blocks, 2048);
        assert_eq!(descriptor.disk_guid[15], 0x01);
        assert_eq!(descriptor.partitions.len(), 1);
        assert_eq!(descriptor.partitions[0].starting_lba, 34);
        assert_eq!(descriptor.partitions[0].ending_lba, 2014);
        assert_eq!(descriptor.partitions[0].partition_name[0], b'E' as u16);
    }

    #[test]
    fn test_load_empty_partition_list() {
        // An empty list is well-formed here; the builder rejects it later.
        let document = r#"{
            "block_size": 512,
            "number_of_blocks": 2048,
            "disk_guid": "00000000-0000-0000-0000-000000000000",
            "partitions": []
        }"#;

        let descriptor = load(document).unwrap();
        assert!(descriptor.partitions.is_empty());
    }

    #[test]
    fn test_load_rejects_missing_field() {
        let document = r#"{ "block_size": 512 }"#;
        assert!(load(document).is_err());
    }

    #[test]
    fn test_load_rejects_bad_guid() {
        let document = r#"{
            "block_size": 512,
            "number_of_blocks": 2048,
            "disk_guid": "not-a-guid",
            "partitions": []
        }"#;
        assert!(load(document).is_err());
    }
}
