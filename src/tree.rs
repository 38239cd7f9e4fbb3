use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::queue::{PriorityQueue, Weighted};

/// Marks an internal node in the serialized tree.
pub const INTERNAL_MARKER: u8 = b'*';
/// Precedes a leaf whose symbol collides with one of the markers.
pub const ESCAPE_MARKER: u8 = b'\\';
/// 256 leaves can sit at most this deep.
pub const MAX_DEPTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub freq: u64,
    pub byte: u8, // INTERNAL_MARKER for internal nodes
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn leaf(byte: u8, freq: u64) -> Self {
        Self {
            freq,
            byte,
            left: None,
            right: None,
        }
    }

    /// Joins two subtrees; `left` is the one popped first.
    pub fn merge(left: Node, right: Node) -> Self {
        Self {
            freq: left.freq + right.freq,
            byte: INTERNAL_MARKER,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn needs_escape(&self) -> bool {
        self.is_leaf() && (self.byte == INTERNAL_MARKER || self.byte == ESCAPE_MARKER)
    }

    fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height() + 1);
        let right = self.right.as_ref().map_or(0, |n| n.height() + 1);
        left.max(right)
    }

    fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.left.as_ref().map_or(0, |n| n.leaf_count())
            + self.right.as_ref().map_or(0, |n| n.leaf_count())
    }

    fn write_preorder(&self, out: &mut Vec<u8>) {
        if self.is_leaf() {
            if self.needs_escape() {
                out.push(ESCAPE_MARKER);
            }
            out.push(self.byte);
            return;
        }
        out.push(INTERNAL_MARKER);
        if let Some(ref left) = self.left {
            left.write_preorder(out);
        }
        if let Some(ref right) = self.right {
            right.write_preorder(out);
        }
    }
}

impl Weighted for Node {
    fn weight(&self) -> u64 {
        self.freq
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: Box<Node>,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are queued in ascending byte order and equal weights leave the
    /// queue in insertion order, so the same frequencies always produce the
    /// same tree. A lone symbol becomes a bare root leaf; its code is `0`.
    pub fn build(freq: &FrequencyTable) -> Result<Self> {
        let mut queue = PriorityQueue::new();
        for (byte, count) in freq.present() {
            queue.insert(Node::leaf(byte, count));
        }

        if queue.len() == 1 {
            debug!("single symbol input, tree is one leaf");
        }

        while let Some(left) = queue.pop_min() {
            match queue.pop_min() {
                Some(right) => queue.insert(Node::merge(left, right)),
                None => {
                    return Ok(Self {
                        root: Box::new(left),
                    });
                }
            }
        }
        Err(HuffmanError::EmptyInput)
    }

    /// Preorder bytes: `*` for internal nodes, the symbol for leaves, with
    /// `\` in front of leaves holding `*` or `\`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.root.write_preorder(&mut out);
        out
    }

    /// Rebuilds a tree from exactly `bytes`; every byte must be consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut reader = TreeReader { bytes, pos: 0 };
        let root = reader.read_node(0)?;
        if reader.pos != bytes.len() {
            return Err(reader.error("trailing bytes after the tree"));
        }
        Ok(Self {
            root: Box::new(root),
        })
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

struct TreeReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl TreeReader<'_> {
    fn next_byte(&mut self) -> Result<u8> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| self.error("tree ends before its structure is complete"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_node(&mut self, depth: usize) -> Result<Node> {
        if depth > MAX_DEPTH {
            return Err(self.error("tree deeper than 255 levels"));
        }
        match self.next_byte()? {
            ESCAPE_MARKER => Ok(Node::leaf(self.next_byte()?, 0)),
            INTERNAL_MARKER => {
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                Ok(Node {
                    freq: 0,
                    byte: INTERNAL_MARKER,
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                })
            }
            byte => Ok(Node::leaf(byte, 0)),
        }
    }

    fn error(&self, reason: &'static str) -> HuffmanError {
        HuffmanError::MalformedTree {
            position: self.pos,
            tree_size: self.bytes.len(),
            reason,
        }
    }
}
