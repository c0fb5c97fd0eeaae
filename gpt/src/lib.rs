//! GPT Disk Layout Synthesis
//!
//! A `no_std` builder for the raw bytes of a GUID Partition Table layout
//! as defined by the UEFI Specification 2.8, Section 5.
//!
//! # Overview
//!
//! Given a logical description of a disk (block size, total block count,
//! disk GUID, partition list) this crate produces:
//! - A `header` blob for the front of the image: protective MBR, primary
//!   GPT header, primary partition entry array
//! - A `footer` blob for the back of the image: backup partition entry
//!   array, backup GPT header
//!
//! Writing `header` at offset 0 and `footer` flush against the end of a
//! device of `block_size * number_of_blocks` bytes yields a complete,
//! self-consistent GPT image that standard tools accept.
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Checksum layer** - the reflected CRC-32 used throughout GPT
//! 2. **Record layer** - bit-exact little-endian serialization of the
//!    protective MBR, GPT header, and partition entry records
//! 3. **Builder layer** - descriptor validation and blob assembly
//!
//! # Usage
//!
//! ```ignore
//! use gpt::{make_gpt, GptDescriptor, GptPartitionEntry};
//!
//! let descriptor = GptDescriptor {
//!     block_size: 512,
//!     number_of_blocks: 2048,
//!     disk_guid: [0; 16],
//!     partitions: vec![esp_partition],
//! };
//!
//! let data = make_gpt(&descriptor)?;
//! // ... write data.header at offset 0 ...
//! // ... write data.footer at device_size - data.footer.len() ...
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// The produced layout is little-endian on the wire; big-endian hosts are
// not supported.
#[cfg(target_endian = "big")]
compile_error!("gpt must be built for a little-endian target");

pub mod builder;
pub mod crc32;
pub mod error;
pub mod records;
pub mod types;

pub use builder::make_gpt;
pub use crc32::crc32;
pub use error::{GptError, Result};
pub use types::{GptData, GptDescriptor, GptPartitionEntry, Guid, Lba};
