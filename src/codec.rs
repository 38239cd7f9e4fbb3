use tracing::{debug, info};

use crate::bits;
use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::header::{HEADER_LEN, Header};
use crate::tree::HuffmanTree;

/// Compresses `data` into `[header][tree][packed codes]`.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let freq = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&freq)?;
    let codes = CodeTable::from_tree(&tree);
    let stats = codes.stats(&freq);

    let tree_bytes = tree.serialize();
    let header = Header::new(stats.padding(), tree_bytes.len())?;
    debug!(
        symbols = freq.distinct(),
        tree_size = tree_bytes.len(),
        height = tree.height(),
        original_bits = stats.original_bits,
        encoded_bits = stats.encoded_bits,
        padding = header.padding(),
        "built code table"
    );

    let payload = bits::pack(data, &codes)?;

    let mut output = Vec::with_capacity(HEADER_LEN + tree_bytes.len() + payload.len());
    output.extend_from_slice(&header.encode());
    output.extend_from_slice(&tree_bytes);
    output.extend_from_slice(&payload);

    info!(input = data.len(), output = output.len(), "compressed");
    Ok(output)
}

/// Reverses [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let archive = inspect(data)?;
    let output = bits::unpack(archive.payload, &archive.tree, archive.header.padding())?;
    info!(input = data.len(), output = output.len(), "decompressed");
    Ok(output)
}

/// A compressed buffer split into its parts, payload still packed.
#[derive(Debug)]
pub struct Archive<'a> {
    pub header: Header,
    pub tree: HuffmanTree,
    pub payload: &'a [u8],
}

impl Archive<'_> {
    pub fn codes(&self) -> CodeTable {
        CodeTable::from_tree(&self.tree)
    }

    /// Number of meaningful bits in the payload.
    pub fn payload_bits(&self) -> usize {
        (self.payload.len() * 8).saturating_sub(usize::from(self.header.padding()))
    }
}

/// Parses the header and tree without decoding the payload.
pub fn inspect(data: &[u8]) -> Result<Archive<'_>> {
    let header = Header::decode(data)?;
    let tree_size = header.tree_size();

    let body = &data[HEADER_LEN..];
    let Some(tree_bytes) = body.get(..tree_size) else {
        return Err(HuffmanError::MalformedTree {
            position: body.len(),
            tree_size,
            reason: "buffer is shorter than the declared tree size",
        });
    };
    let payload = &body[tree_size..];
    // Every compressed input holds at least one code bit.
    if payload.is_empty() {
        return Err(HuffmanError::MalformedHeader(format!(
            "{tree_size}-byte tree but no payload after it"
        )));
    }

    let tree = HuffmanTree::deserialize(tree_bytes)?;
    debug!(
        tree_size,
        padding = header.padding(),
        payload = payload.len(),
        "parsed header"
    );
    Ok(Archive {
        header,
        tree,
        payload,
    })
}
