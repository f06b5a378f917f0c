use crate::alphabets::protein;
use crate::error::{MapError, MapResult};
use crate::seq::traits::SeqBytes;

/// Amino-acid sequence in the normalized form the index stores: upper-case,
/// letters outside the alphabet folded to `X`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProteinSeq {
    bytes: Vec<u8>,
}

impl ProteinSeq {
    pub fn new(mut bytes: Vec<u8>) -> MapResult<Self> {
        for (pos, b) in bytes.iter_mut().enumerate() {
            match protein::normalize(*b) {
                Some(norm) => *b = norm,
                None => return Err(MapError::InvalidChar { ch: *b as char, pos }),
            }
        }
        Ok(Self { bytes })
    }

    #[inline]
    pub(crate) fn from_bytes_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl SeqBytes for ProteinSeq {
    fn as_bytes(&self) -> &[u8] {
        ProteinSeq::as_bytes(self)
    }

    fn from_bytes(bytes: Vec<u8>) -> MapResult<Self> {
        ProteinSeq::new(bytes)
    }
}
