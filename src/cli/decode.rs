use std::fs;

use anyhow::{Context, Result};
use huffpack::{Huffman, Mutator, if_not_tracing, if_tracing};
use voxell_timer::time_fn;

use crate::cli::DecodeArgs;

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let compressed_data = fs::read(input_path).with_context(|| format!("failed to read input file {}", input_path.display()))?;
    let mut decompressed_data = Vec::new();
    let mut mutator = Huffman;
    let (res, elapsed) = time_fn(|| mutator.revert_mutation(&compressed_data, &mut decompressed_data));
    res.with_context(|| format!("failed to decode {}", input_path.display()))?;
    if_tracing! {
        tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %elapsed.as_micros(), decompressed_len = decompressed_data.len(), "decode finished");
    }
    if_not_tracing! {
        let _ = elapsed;
    }
    fs::write(output_path, decompressed_data).with_context(|| format!("failed to write output file {}", output_path.display()))?;
    Ok(())
}
