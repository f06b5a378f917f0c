use crate::alphabets::dna;
use crate::error::{MapError, MapResult};
use crate::seq::genetic_code::CodonTable;
use crate::seq::protein::ProteinSeq;
use crate::seq::traits::SeqBytes;
use crate::seq::Frame;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DnaSeq {
    bytes: Vec<u8>,
}

impl DnaSeq {
    pub fn new(bytes: Vec<u8>) -> MapResult<Self> {
        if let Some((pos, b)) = dna::iupac_alphabet().first_invalid(&bytes) {
            return Err(MapError::InvalidChar { ch: b as char, pos });
        }
        Ok(Self { bytes })
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

    pub fn reverse_complement(&self) -> Self {
        let out = dna::reverse_complement(self.as_bytes());
        Self { bytes: out }
    }

    /// Translation of a single reading frame. Incomplete trailing codons are dropped.
    pub fn translate_frame(&self, frame: Frame, table: &CodonTable) -> ProteinSeq {
        match frame {
            Frame::Forward(_) => translate_from(self.as_bytes(), frame.offset(), table),
            Frame::Reverse(_) => {
                let rc = dna::reverse_complement(self.as_bytes());
                translate_from(&rc, frame.offset(), table)
            }
        }
    }

    /// All six translations in [`Frame::ALL`] order: three forward frames
    /// followed by the three frames of the reverse complement.
    pub fn six_frame(&self, table: &CodonTable) -> [ProteinSeq; 6] {
        let fwd = self.as_bytes();
        let rc = dna::reverse_complement(fwd);
        [
            translate_from(fwd, 0, table),
            translate_from(fwd, 1, table),
            translate_from(fwd, 2, table),
            translate_from(&rc, 0, table),
            translate_from(&rc, 1, table),
            translate_from(&rc, 2, table),
        ]
    }
}

impl SeqBytes for DnaSeq {
    fn as_bytes(&self) -> &[u8] {
        DnaSeq::as_bytes(self)
    }

    fn from_bytes(bytes: Vec<u8>) -> MapResult<Self> {
        DnaSeq::new(bytes)
    }
}

fn translate_from(bytes: &[u8], offset: usize, table: &CodonTable) -> ProteinSeq {
    if bytes.len() <= offset {
        return ProteinSeq::from_bytes_unchecked(Vec::new());
    }
    ProteinSeq::from_bytes_unchecked(table.translate(&bytes[offset..]))
}
