pub mod collection;
pub mod dna;
pub mod genetic_code;
pub mod protein;
pub mod record;
pub mod traits;

pub use collection::{ReferenceSet, SequenceCollection};
pub use genetic_code::{CodonTable, GeneticCode};
pub use record::SeqRecord;

use crate::error::{MapError, MapResult};

/// One of the six reading frames of a DNA sequence. The inner value is the
/// codon offset (0, 1 or 2) on the respective strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    Forward(u8),
    Reverse(u8),
}

impl Frame {
    /// Frames in the order their translations are stored in a collection.
    pub const ALL: [Frame; 6] = [
        Frame::Forward(0),
        Frame::Forward(1),
        Frame::Forward(2),
        Frame::Reverse(0),
        Frame::Reverse(1),
        Frame::Reverse(2),
    ];

    pub fn new(index: u8) -> MapResult<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(MapError::InvalidFrame { frame: index })
    }

    /// Frame of a collection entry built by six-frame translation.
    #[inline]
    pub fn from_sequence_id(sequence_id: usize) -> Self {
        Self::ALL[sequence_id % 6]
    }

    /// Position of this frame in [`Frame::ALL`].
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Frame::Forward(offset) => offset,
            Frame::Reverse(offset) => 3 + offset,
        }
    }

    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Frame::Forward(offset) | Frame::Reverse(offset) => offset as usize,
        }
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, Frame::Reverse(_))
    }
}
