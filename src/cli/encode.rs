use std::fs;

use anyhow::{Context, Result};
use huffpack::{Huffman, Mutator, if_not_tracing, if_tracing};
use voxell_timer::time_fn;

use crate::cli::EncodeArgs;

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = fs::read(input_path).with_context(|| format!("failed to read input file {}", input_path.display()))?;
    let mut compressed_data = Vec::new();
    let mut mutator = Huffman;
    let (res, elapsed) = time_fn(|| mutator.drive_mutation(&input_data, &mut compressed_data));
    res.with_context(|| format!("failed to encode {}", input_path.display()))?;
    if_tracing! {
        tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %elapsed.as_micros(), original_len = input_data.len(), compressed_len = compressed_data.len(), "encode finished");
    }
    if_not_tracing! {
        let _ = elapsed;
    }
    fs::write(output_path, compressed_data).with_context(|| format!("failed to write output file {}", output_path.display()))?;
    Ok(())
}
