//! Image file output

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use anyhow::{Context, Result};

use gpt::{GptData, GptDescriptor};

/// Write the GPT blobs into a fresh image file.
///
/// The file is truncated to `block_size * number_of_blocks` bytes, the
/// header blob lands at offset 0 and the footer blob flush against the
/// end. Nothing is written in between, so the middle of the image stays
/// sparse on filesystems that support it.
pub fn write_image(path: &Path, descriptor: &GptDescriptor, data: &GptData) -> Result<()> {
    let disk_bytes = descriptor
        .block_size
        .checked_mul(descriptor.number_of_blocks)
        .context("device byte size overflows")?;

    let mut file = File::create(path).context("error opening file")?;
    file.set_len(disk_bytes).context("error truncating file")?;

    file.write_all(&data.header).context("error writing header")?;

    file.seek(SeekFrom::Start(disk_bytes - data.footer.len() as u64))
        .context("error seeking to footer start")?;
    file.write_all(&data.footer).context("error writing footer")?;

    Ok(())
}
