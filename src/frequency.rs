use std::ops::Index;

/// Occurrence count for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Byte values with a non-zero count, in ascending byte order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    pub fn distinct(&self) -> usize {
        self.present().count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Index<u8> for FrequencyTable {
    type Output = u64;

    fn index(&self, byte: u8) -> &u64 {
        &self.counts[byte as usize]
    }
}
