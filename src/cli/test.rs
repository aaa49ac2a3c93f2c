use std::{fs, path::Path};

use anyhow::{Context, Result};
use huffpack::{Huffman, Mutator, RoundTripTestResult};
use serde::Serialize;
use voxell_timer::time_fn;

use crate::cli::{CliError, TestArgs};

#[derive(Debug, Serialize)]
struct RoundtripReport<'a> {
    path: &'a Path,
    passed: bool,
    original_len: usize,
    compressed_len: usize,
    decompressed_len: usize,
    /// compressed size over original size, in percent
    ratio_percent: f64,
    saved_bytes: i64,
    elapsed_us: u128,
}

impl<'a> RoundtripReport<'a> {
    fn new(path: &'a Path, result: &RoundTripTestResult<'_>, elapsed_us: u128) -> Self {
        let original_len = result.get_original().len();
        let compressed_len = result.get_compressed().len();
        Self {
            path,
            passed: result.is_successful(),
            original_len,
            compressed_len,
            decompressed_len: result.get_decompressed().len(),
            ratio_percent: result.compression_ratio() * 100.0,
            saved_bytes: original_len as i64 - compressed_len as i64,
            elapsed_us,
        }
    }

    fn render(&self) -> String {
        format!(
            "======== {} {} ========\n\t{}us roundtrip\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes",
            if self.passed { "PASSED" } else { "FAILED" },
            self.path.display(),
            self.elapsed_us,
            self.original_len,
            self.compressed_len,
            self.decompressed_len,
            self.ratio_percent,
            self.saved_bytes,
        )
    }
}

pub fn test(args: TestArgs) -> Result<()> {
    let input = fs::read(&args.input).with_context(|| format!("failed to read input file {}", args.input.display()))?;

    let mut mutator = Huffman;
    let (result, elapsed) = time_fn(|| mutator.test_roundtrip(&input));
    let result = result.with_context(|| format!("roundtrip of {} failed", args.input.display()))?;
    let report = RoundtripReport::new(&args.input, &result, elapsed.as_micros());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(CliError::from)?);
    } else {
        eprintln!("{}", report.render());
    }

    if !report.passed {
        return Err(CliError::RoundtripMismatch(args.input.clone()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reflects_the_roundtrip() {
        let data = b"hello world";
        let mut mutator = Huffman;
        let result = mutator.test_roundtrip(data).unwrap();
        let report = RoundtripReport::new(Path::new("hello.txt"), &result, 7);

        assert!(report.passed);
        assert_eq!(report.original_len, 11);
        assert_eq!(report.compressed_len, 22);
        assert_eq!(report.saved_bytes, -11);
        assert!(report.render().starts_with("======== PASSED hello.txt ========"));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["decompressed_len"], 11);
        assert_eq!(json["passed"], true);
    }
}
