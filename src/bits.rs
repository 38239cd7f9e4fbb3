use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::tree::HuffmanTree;

/// Concatenates the code of every input byte, MSB first. The last byte is
/// zero-filled.
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    {
        let mut writer = BitWriter::endian(&mut output, BigEndian);
        for &byte in data {
            let code = codes.get(byte).ok_or(HuffmanError::MissingCode(byte))?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
        }
        writer.byte_align()?;
    }
    Ok(output)
}

/// Walks the tree one bit at a time, ignoring the last `padding` bits.
pub fn unpack(payload: &[u8], tree: &HuffmanTree, padding: u8) -> Result<Vec<u8>> {
    let total_bits = (payload.len() * 8)
        .checked_sub(usize::from(padding))
        .ok_or_else(|| {
            HuffmanError::MalformedHeader(format!(
                "{padding} padding bits but the payload holds {} bits",
                payload.len() * 8
            ))
        })?;

    let root = tree.root.as_ref();
    if root.is_leaf() {
        return Ok(vec![root.byte; total_bits]);
    }

    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);
    let mut output = Vec::with_capacity(payload.len() * 2);
    let mut current = root;
    for bit_index in 0..total_bits {
        let bit = reader.read_bit()?;
        let next = if bit {
            current.right.as_deref()
        } else {
            current.left.as_deref()
        };
        current = next.ok_or(HuffmanError::MalformedStream {
            bit: bit_index,
            reason: "descent past a missing child",
        })?;
        if current.is_leaf() {
            output.push(current.byte);
            current = root;
        }
    }

    if !std::ptr::eq(current, root) {
        return Err(HuffmanError::MalformedStream {
            bit: total_bits,
            reason: "stream ends inside a code",
        });
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::Node;

    fn setup(data: &[u8]) -> (HuffmanTree, CodeTable) {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap();
        let codes = CodeTable::from_tree(&tree);
        (tree, codes)
    }

    #[test]
    fn packs_msb_first() {
        // c=0 a=10 b=11
        let (_, codes) = setup(b"abc");
        let packed = pack(b"abcc", &codes).unwrap();
        // 10 11 0 0 -> 1011_0000
        assert_eq!(packed, vec![0b1011_0000]);
    }

    #[test]
    fn flushes_every_eight_bits() {
        let (_, codes) = setup(b"abc");
        // 10 10 10 10 | 11
        let packed = pack(b"aaaab", &codes).unwrap();
        assert_eq!(packed, vec![0b1010_1010, 0b1100_0000]);
    }

    #[test]
    fn unpack_stops_at_padding() {
        let (tree, _) = setup(b"abc");
        // "abcc" is 6 bits, so 2 bits of padding that would otherwise read as "cc"
        let decoded = unpack(&[0b1011_0000], &tree, 2).unwrap();
        assert_eq!(decoded, b"abcc");
        let decoded = unpack(&[0b1011_0000], &tree, 0).unwrap();
        assert_eq!(decoded, b"abcccc");
    }

    #[test]
    fn ending_inside_a_code_is_malformed() {
        let (tree, _) = setup(b"abc");
        // 1011_0001: the final 1 starts a code that never finishes.
        let err = unpack(&[0b1011_0001], &tree, 0).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedStream { bit: 8, .. }));
    }

    #[test]
    fn missing_child_is_malformed() {
        let tree = HuffmanTree {
            root: Box::new(Node {
                freq: 0,
                byte: b'*',
                left: Some(Box::new(Node::leaf(b'x', 0))),
                right: None,
            }),
        };
        let err = unpack(&[0b0100_0000], &tree, 6).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedStream { bit: 1, .. }));
    }

    #[test]
    fn bare_leaf_root_emits_one_symbol_per_bit() {
        let tree = HuffmanTree {
            root: Box::new(Node::leaf(b'z', 0)),
        };
        assert_eq!(unpack(&[0x00], &tree, 5).unwrap(), b"zzz");
    }

    #[test]
    fn padding_larger_than_payload_is_rejected() {
        let (tree, _) = setup(b"abc");
        let err = unpack(&[], &tree, 3).unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedHeader(_)));
    }

    #[test]
    fn byte_outside_table_is_rejected() {
        let (_, codes) = setup(b"abc");
        let err = pack(b"abd", &codes).unwrap_err();
        assert!(matches!(err, HuffmanError::MissingCode(b'd')));
    }
}
