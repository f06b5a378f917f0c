//! Index positions back to reference coordinates.
//!
//! In DNA mode collection entry `6k + f` is frame `f` of reference `k`, so a
//! hit at residue `start` covers nucleotides `[3 * start + offset, ...)` on the
//! frame's strand. Reverse-strand intervals are mirrored onto the forward
//! strand using the untranslated reference length.

use crate::config::InputType;
use crate::index::Occurrence;
use crate::seq::{Frame, ReferenceSet};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A hit on the forward strand of a reference, 0-based half-open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenomicHit {
    pub reference_id: usize,
    pub begin: usize,
    pub end: usize,
    pub strand: Strand,
}

pub fn map_dna(occurrence: Occurrence, query_len: usize, original_len: usize) -> GenomicHit {
    let frame = Frame::from_sequence_id(occurrence.sequence_id);
    let raw_begin = occurrence.offset * 3 + frame.offset();
    let raw_end = raw_begin + query_len * 3;
    let (begin, end, strand) = match frame {
        Frame::Forward(_) => (raw_begin, raw_end, Strand::Forward),
        Frame::Reverse(_) => (
            original_len.saturating_sub(raw_end),
            original_len.saturating_sub(raw_begin),
            Strand::Reverse,
        ),
    };
    GenomicHit {
        reference_id: occurrence.sequence_id / 6,
        begin,
        end,
        strand,
    }
}

pub fn map_peptide(occurrence: Occurrence, query_len: usize) -> GenomicHit {
    GenomicHit {
        reference_id: occurrence.sequence_id,
        begin: occurrence.offset,
        end: occurrence.offset + query_len,
        strand: Strand::Forward,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinateMapper {
    input_type: InputType,
}

impl CoordinateMapper {
    pub fn new(input_type: InputType) -> Self {
        Self { input_type }
    }

    /// `None` when the occurrence points past the reference table.
    pub fn map(
        &self,
        occurrence: Occurrence,
        query_len: usize,
        references: &ReferenceSet,
    ) -> Option<GenomicHit> {
        match self.input_type {
            InputType::Dna => {
                let original_len = references.original_len(occurrence.sequence_id / 6)?;
                Some(map_dna(occurrence, query_len, original_len))
            }
            InputType::Peptide => {
                references.original_len(occurrence.sequence_id)?;
                Some(map_peptide(occurrence, query_len))
            }
        }
    }
}
