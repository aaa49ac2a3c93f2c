pub use anyhow::Result;

/// Shared behavior for reversible byte transforms.
///
/// Both directions write into a caller-provided buffer, replacing its contents.
pub trait Mutator {
    /// Transforms `data` (compresses it) into `buf`.
    fn drive_mutation(&mut self, data: &[u8], buf: &mut Vec<u8>) -> Result<()>;

    /// Undoes [`drive_mutation`](Mutator::drive_mutation), writing the original data into `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` was malformed.
    fn revert_mutation(&mut self, data: &[u8], buf: &mut Vec<u8>) -> Result<()>;

    /// Performs a round-trip test on the mutator.
    ///
    /// Use for sanity checking both directions at once.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let mut compressed = Vec::new();
        self.drive_mutation(data, &mut compressed)?;
        let mut decompressed = Vec::new();
        self.revert_mutation(&compressed, &mut decompressed)?;
        let equal = data == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }
}

/// Everything a [`Mutator::test_roundtrip`] call saw: the input, both intermediate buffers, and
/// whether the input came back unchanged.
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// `true` when reverting the mutation reproduced the input byte for byte.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// Input handed to [`Mutator::drive_mutation`].
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// Output of [`Mutator::drive_mutation`], the encoded stream.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// Output of [`Mutator::revert_mutation`] applied to the encoded stream.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }

    /// Encoded size over input size. Zero for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.original.is_empty() {
            return 0.0;
        }
        self.compressed.len() as f64 / self.original.len() as f64
    }
}
