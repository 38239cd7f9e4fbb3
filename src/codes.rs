use std::fmt;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Path from the root to a leaf, `false` for left and `true` for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Bit totals before and after encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub original_bits: u64,
    pub encoded_bits: u64,
}

impl Stats {
    /// Filler bits in the last packed byte, 0 to 7.
    pub fn padding(&self) -> u8 {
        (self.original_bits as i128 - self.encoded_bits as i128).rem_euclid(8) as u8
    }
}

#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        let mut prefix = Vec::new();
        walk(&tree.root, &mut prefix, &mut codes);
        Self { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Codes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|c| (byte as u8, c)))
    }

    pub fn stats(&self, freq: &FrequencyTable) -> Stats {
        freq.present().fold(
            Stats {
                original_bits: 0,
                encoded_bits: 0,
            },
            |mut acc, (byte, count)| {
                acc.original_bits += count * 8;
                acc.encoded_bits += count * self.get(byte).map_or(0, |c| c.len() as u64);
                acc
            },
        )
    }
}

fn walk(node: &Node, prefix: &mut Vec<bool>, codes: &mut [Option<Code>]) {
    if node.is_leaf() {
        // A bare leaf at the root still needs one bit.
        let bits = if prefix.is_empty() {
            vec![false]
        } else {
            prefix.clone()
        };
        codes[node.byte as usize] = Some(Code(bits));
        return;
    }
    let depth = prefix.len();
    if let Some(ref left) = node.left {
        prefix.push(false);
        walk(left, prefix, codes);
        prefix.truncate(depth);
    }
    if let Some(ref right) = node.right {
        prefix.push(true);
        walk(right, prefix, codes);
        prefix.truncate(depth);
    }
}
