//! Huffman compression of in-memory byte buffers.
//!
//! A compressed buffer is a 2-byte big-endian header (3 bits of padding
//! count, 13 bits of tree size), the preorder-serialized tree, then the
//! packed codes.
//!
//! ```
//! let packed = huff::compress(b"abracadabra")?;
//! assert_eq!(huff::decompress(&packed)?, b"abracadabra");
//! # Ok::<(), huff::HuffmanError>(())
//! ```

pub mod bits;
pub mod codec;
pub mod codes;
pub mod error;
pub mod frequency;
pub mod header;
pub mod queue;
pub mod tree;

pub use codec::{Archive, compress, decompress, inspect};
pub use codes::{Code, CodeTable, Stats};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use header::Header;
pub use tree::HuffmanTree;
