use crate::error::{HuffmanError, Result};

pub const HEADER_LEN: usize = 2;
pub const MAX_TREE_SIZE: usize = 0x1fff;
pub const MAX_PADDING: u8 = 7;

const PADDING_SHIFT: u16 = 13;
const TREE_SIZE_MASK: u16 = 0x1fff;

/// Two big-endian bytes: padding count in the top 3 bits, tree size in the
/// low 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    padding: u8,
    tree_size: u16,
}

impl Header {
    pub fn new(padding: u8, tree_size: usize) -> Result<Self> {
        if padding > MAX_PADDING {
            return Err(HuffmanError::MalformedHeader(format!(
                "padding of {padding} bits does not fit in 3 bits"
            )));
        }
        if tree_size > MAX_TREE_SIZE {
            return Err(HuffmanError::UnsupportedTreeSize(tree_size));
        }
        if tree_size == 0 {
            return Err(empty_tree());
        }
        Ok(Self {
            padding,
            tree_size: tree_size as u16,
        })
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn tree_size(&self) -> usize {
        self.tree_size as usize
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let packed = (u16::from(self.padding) << PADDING_SHIFT) | (self.tree_size & TREE_SIZE_MASK);
        packed.to_be_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let &[high, low, ..] = bytes else {
            return Err(HuffmanError::MalformedHeader(format!(
                "need {HEADER_LEN} header bytes, got {}",
                bytes.len()
            )));
        };
        let packed = u16::from_be_bytes([high, low]);
        let tree_size = packed & TREE_SIZE_MASK;
        if tree_size == 0 {
            return Err(empty_tree());
        }
        Ok(Self {
            padding: (packed >> PADDING_SHIFT) as u8,
            tree_size,
        })
    }
}

fn empty_tree() -> HuffmanError {
    HuffmanError::MalformedHeader("tree size is zero".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_padding_above_tree_size() {
        let header = Header::new(5, 0x0123).unwrap();
        // 101 0000100100011
        assert_eq!(header.encode(), [0b1010_0001, 0x23]);
    }

    #[test]
    fn decodes_both_fields() {
        let header = Header::decode(&[0xff, 0xff, 0x00]).unwrap();
        assert_eq!(header.padding(), 7);
        assert_eq!(header.tree_size(), MAX_TREE_SIZE);

        let header = Header::decode(&[0x00, 0x03]).unwrap();
        assert_eq!(header.padding(), 0);
        assert_eq!(header.tree_size(), 3);
    }

    #[test]
    fn encode_then_decode_agrees() {
        let header = Header::new(3, 4000).unwrap();
        assert_eq!(Header::decode(&header.encode()).unwrap(), header);
    }

    #[test]
    fn oversized_tree_is_unsupported() {
        let err = Header::new(0, MAX_TREE_SIZE + 1).unwrap_err();
        assert!(matches!(err, HuffmanError::UnsupportedTreeSize(8192)));
    }

    #[test]
    fn short_buffer_is_malformed() {
        let err = Header::decode(&[0x20]).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedHeader(_)));
    }

    #[test]
    fn zero_tree_size_is_malformed() {
        assert!(matches!(
            Header::decode(&[0xe0, 0x00]),
            Err(HuffmanError::MalformedHeader(_))
        ));
        assert!(matches!(
            Header::new(0, 0),
            Err(HuffmanError::MalformedHeader(_))
        ));
    }

    #[test]
    fn padding_over_seven_is_rejected() {
        assert!(Header::new(8, 1).is_err());
    }
}
