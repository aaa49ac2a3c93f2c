use core::fmt;

use serde::Serialize;

use crate::algorithms::huffman::frequency::FrequencyEntry;

/// A finished prefix-code tree.
///
/// Weights only matter while the tree is being built, so they are not part of this type; see
/// [`WeightedNode`] for the construction-time form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf { value: u8 },
    Internal { left: Box<TreeNode>, right: Box<TreeNode> },
}

impl TreeNode {
    pub const fn leaf(value: u8) -> Self {
        Self::Leaf { value }
    }

    pub fn internal(left: Self, right: Self) -> Self {
        Self::Internal {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Finds the root-to-leaf path of `value`: `0` for every left branch, `1` for every right one.
    ///
    /// A tree consisting of a single leaf yields the empty path for its own value.
    pub fn search(&self, value: u8) -> Option<BitPath> {
        match self {
            Self::Leaf { value: leaf } => (*leaf == value).then(BitPath::empty),
            Self::Internal { left, right } => left
                .search(value)
                .and_then(|path| path.prepend(false))
                .or_else(|| right.search(value).and_then(|path| path.prepend(true))),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> u32 {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Tree node that still carries its aggregate weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightedNode {
    Leaf {
        value: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<WeightedNode>,
        right: Box<WeightedNode>,
    },
}

impl WeightedNode {
    pub const fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: Self, right: Self) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Drops the weights.
    pub fn into_tree(self) -> TreeNode {
        match self {
            Self::Leaf { value, .. } => TreeNode::leaf(value),
            Self::Internal { left, right, .. } => TreeNode::internal(left.into_tree(), right.into_tree()),
        }
    }
}

impl From<FrequencyEntry> for WeightedNode {
    fn from(entry: FrequencyEntry) -> Self {
        Self::Leaf {
            value: entry.value,
            weight: entry.count,
        }
    }
}

/// Builds the Huffman tree for a frequency table, keeping the weights.
///
/// The two lightest nodes are merged (first removed becomes the left child) until one node
/// remains. A merged node is placed in front of every node of equal weight. Returns `None` for an
/// empty table; a single entry yields a lone leaf.
pub fn build_weighted_tree(entries: &[FrequencyEntry]) -> Option<WeightedNode> {
    let mut nodes = entries.iter().copied().map(WeightedNode::from).collect::<Vec<_>>();
    nodes.sort_by_key(WeightedNode::weight);

    while nodes.len() > 1 {
        let left = nodes.remove(0);
        let right = nodes.remove(0);
        let merged = WeightedNode::merge(left, right);
        let at = nodes.partition_point(|node| node.weight() < merged.weight());
        nodes.insert(at, merged);
    }

    nodes.pop()
}

pub fn build_tree(entries: &[FrequencyEntry]) -> Option<TreeNode> {
    build_weighted_tree(entries).map(WeightedNode::into_tree)
}

/// A sequence of branch decisions, first branch in the most significant position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitPath {
    bits: u128,
    len: u32,
}

impl BitPath {
    pub const MAX_LEN: u32 = u128::BITS;

    pub const fn empty() -> Self {
        Self { bits: 0, len: 0 }
    }

    /// Puts `bit` in front of the path. Returns `None` once the path would exceed [`Self::MAX_LEN`].
    pub fn prepend(self, bit: bool) -> Option<Self> {
        (self.len < Self::MAX_LEN).then(|| Self {
            bits: self.bits | (u128::from(bit) << self.len),
            len: self.len + 1,
        })
    }

    /// The path right-aligned, first branch at bit `len - 1`.
    pub const fn bits(&self) -> u128 {
        self.bits
    }

    pub const fn len(&self) -> u32 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Branches from the root downwards, `true` meaning right.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(|i| (self.bits >> i) & 1 == 1)
    }
}

impl fmt::Display for BitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::huffman::frequency::frequency_table;

    fn entry(value: u8, count: u64) -> FrequencyEntry {
        FrequencyEntry { value, count }
    }

    fn leaf(value: u8) -> TreeNode {
        TreeNode::leaf(value)
    }

    #[test]
    fn empty_table_has_no_tree() {
        assert_eq!(build_tree(&[]), None);
    }

    #[test]
    fn single_entry_is_a_lone_leaf() {
        let tree = build_tree(&[entry(b'a', 8)]).unwrap();
        assert_eq!(tree, leaf(b'a'));
        assert_eq!(tree.search(b'a'), Some(BitPath::empty()));
        assert_eq!(tree.search(b'b'), None);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn lighter_node_goes_left() {
        let tree = build_tree(&[entry(b'a', 1), entry(b'b', 2)]).unwrap();
        assert_eq!(tree, TreeNode::internal(leaf(b'a'), leaf(b'b')));
        assert_eq!(tree.search(b'a').unwrap().to_string(), "0");
        assert_eq!(tree.search(b'b').unwrap().to_string(), "1");
    }

    #[test]
    fn merged_node_precedes_equal_weights() {
        let tree = build_tree(&[entry(b'a', 1), entry(b'b', 1), entry(b'c', 2)]).unwrap();
        assert_eq!(
            tree,
            TreeNode::internal(TreeNode::internal(leaf(b'a'), leaf(b'b')), leaf(b'c'))
        );
    }

    #[test]
    fn hello_world_tree_shape() {
        let weighted = build_weighted_tree(&frequency_table(b"hello world")).unwrap();
        assert_eq!(weighted.weight(), 11);

        let tree = weighted.into_tree();
        let expected = TreeNode::internal(
            TreeNode::internal(
                TreeNode::internal(leaf(b'r'), leaf(b'w')),
                TreeNode::internal(leaf(b'e'), leaf(b'h')),
            ),
            TreeNode::internal(
                leaf(b'l'),
                TreeNode::internal(TreeNode::internal(leaf(b' '), leaf(b'd')), leaf(b'o')),
            ),
        );
        assert_eq!(tree, expected);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.leaf_count(), 8);

        let paths = [
            (b'r', "000"),
            (b'w', "001"),
            (b'e', "010"),
            (b'h', "011"),
            (b'l', "10"),
            (b' ', "1100"),
            (b'd', "1101"),
            (b'o', "111"),
        ];
        for (value, path) in paths {
            assert_eq!(tree.search(value).unwrap().to_string(), path, "path of {:?}", value as char);
        }
        assert_eq!(tree.search(b'z'), None);
    }

    #[test]
    fn path_bits_are_root_first() {
        let path = BitPath::empty().prepend(true).unwrap().prepend(false).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.bits(), 0b01);
        assert_eq!(path.iter().collect::<Vec<_>>(), vec![false, true]);
    }

    #[test]
    fn path_length_is_bounded() {
        let mut path = BitPath::empty();
        for _ in 0..BitPath::MAX_LEN {
            path = path.prepend(true).unwrap();
        }
        assert_eq!(path.prepend(false), None);
    }

    #[test]
    fn skewed_frequencies_build_a_deep_tree() {
        // fibonacci counts produce the most unbalanced tree possible
        let mut counts = vec![1u64, 1];
        while counts.len() < 20 {
            let next = counts[counts.len() - 1] + counts[counts.len() - 2];
            counts.push(next);
        }
        let entries = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| entry(i as u8, count))
            .collect::<Vec<_>>();
        let tree = build_tree(&entries).unwrap();
        assert_eq!(tree.depth(), 19);
        for e in &entries {
            assert!(tree.search(e.value).is_some());
        }
    }
}
