//! make-gpt: write a GPT-partitioned disk image from a JSON descriptor
//!
//! Reads a descriptor document (standard input by default), builds the
//! raw GPT layout and writes it into a fresh image file of
//! `block_size * number_of_blocks` bytes.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use argh::FromArgs;

mod descriptor;
mod writer;

/// Create a file representing a block device with a GPT partition scheme.
#[derive(FromArgs, Debug)]
struct Args {
    /// path of the JSON descriptor document; standard input when omitted
    #[argh(option, short = 'd')]
    descriptor: Option<String>,

    /// output image path
    #[argh(positional, default = "String::from(\"gpt.bin\")")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let document = match &args.descriptor {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("error reading {path}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("error reading standard input")?;
            buffer
        }
    };

    let descriptor = descriptor::load(&document).context("error parsing descriptor")?;
    log::debug!(
        "descriptor: {} blocks of {} bytes, {} partition(s)",
        descriptor.number_of_blocks,
        descriptor.block_size,
        descriptor.partitions.len()
    );

    let data = gpt::make_gpt(&descriptor).context("error building GPT data")?;
    log::debug!(
        "header blob {} bytes, footer blob {} bytes",
        data.header.len(),
        data.footer.len()
    );

    writer::write_image(Path::new(&args.output), &descriptor, &data)
        .with_context(|| format!("error writing {}", args.output))?;

    log::info!(
        "wrote {} ({} bytes)",
        args.output,
        descriptor.block_size * descriptor.number_of_blocks
    );
    Ok(())
}
