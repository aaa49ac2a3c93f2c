//! cli component of the huffpack project.
//!
//! lines starting with `> ` denote valid invocations. `<description>` is a required argument,
//! `[description]` an optional one.
//!
//! # Compression
//!
//! > `huffpack enc <input file> <output file>`
//!
//! the input must only contain bytes in `0..=127` (plain ascii text qualifies). the output is a
//! self-describing stream: a length header, the serialized tree, and the packed payload.
//!
//! # Decompression
//!
//! > `huffpack dec <input file> <output file>`
//!
//! # Testing
//!
//! > `huffpack test <input file> [--json]`
//!
//! compresses the file, immediately decompresses the result, and reports sizes, ratio, and
//! whether the roundtrip reproduced the original bytes.
//!
//! # Tree inspection
//!
//! > `huffpack tree <input file> [--format text|dot|json]`
//!
//! prints the huffman tree that would be built for the file: an indented listing, a graphviz
//! digraph, or json.
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{fmt, io};
use std::path::PathBuf;
use thiserror::Error;

pub mod decode;
pub mod encode;
pub mod test;
pub mod tree;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] fmt::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("roundtrip of {0} did not reproduce the original bytes")]
    RoundtripMismatch(PathBuf),
}

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print the huffman tree built for a file
    Tree(TreeArgs),
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    pub output: PathBuf,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Path for the decompressed file
    pub output: PathBuf,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the original file
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments specific to the tree command
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the file whose byte frequencies build the tree
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = TreeFormat::Text)]
    pub format: TreeFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeFormat {
    /// Indented listing, one node per line
    Text,
    /// Graphviz digraph
    Dot,
    /// JSON document
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_parse() {
        let cli = Cli::try_parse_from(["huffpack", "enc", "in.txt", "out.huff"]).unwrap();
        assert!(matches!(cli.command, Command::Encode(EncodeArgs { .. })));

        let cli = Cli::try_parse_from(["huffpack", "dec", "out.huff", "in.txt"]).unwrap();
        assert!(matches!(cli.command, Command::Decode(DecodeArgs { .. })));
    }

    #[test]
    fn tree_format_defaults_to_text() {
        let cli = Cli::try_parse_from(["huffpack", "tree", "in.txt"]).unwrap();
        let Command::Tree(args) = cli.command else {
            panic!("expected the tree command");
        };
        assert_eq!(args.format, TreeFormat::Text);

        let cli = Cli::try_parse_from(["huffpack", "tree", "in.txt", "--format", "dot"]).unwrap();
        let Command::Tree(args) = cli.command else {
            panic!("expected the tree command");
        };
        assert_eq!(args.format, TreeFormat::Dot);
    }
}
