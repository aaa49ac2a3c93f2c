use serde::Serialize;

/// Number of occurrences of one distinct byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrequencyEntry {
    pub value: u8,
    pub count: u64,
}

/// Counts every distinct byte of `data`.
///
/// The result is ordered by ascending count, and by ascending byte value among equal counts, so
/// the same input always produces the same tree.
pub fn frequency_table(data: &[u8]) -> Vec<FrequencyEntry> {
    let mut freq = [0u64; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let mut entries = freq
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(value, &count)| FrequencyEntry {
            value: value as u8,
            count,
        })
        .collect::<Vec<_>>();

    // values are already ascending, a stable sort keeps them that way within equal counts.
    entries.sort_by_key(|entry| entry.count);
    entries
}
