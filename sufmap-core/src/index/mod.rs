//! Generalized suffix array over a [`SequenceCollection`].
//!
//! All sequences are concatenated, each followed by a separator byte that no
//! normalized residue uses, so a match can never span two sequences. Only
//! suffixes starting on a residue are kept in the array.

pub mod finder;
pub mod persist;
mod suffix_array;

pub use finder::Finder;
pub use persist::{IndexMeta, IndexPlan};

use crate::error::{MapError, MapResult};
use crate::seq::SequenceCollection;
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub(crate) const SEPARATOR: u8 = 0;

/// One exact match: the collection entry and the residue offset inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub sequence_id: usize,
    pub offset: usize,
}

impl Occurrence {
    pub fn new(sequence_id: usize, offset: usize) -> Self {
        Self {
            sequence_id,
            offset,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringIndex {
    text: Vec<u8>,
    starts: Vec<u32>,
    sa: Vec<u32>,
}

impl StringIndex {
    pub fn build(collection: &SequenceCollection) -> MapResult<Self> {
        let text_len = collection.total_len() + collection.len();
        if text_len > u32::MAX as usize {
            return Err(MapError::IndexTooLarge {
                len: text_len,
                limit: u32::MAX as usize,
            });
        }

        let mut text = Vec::with_capacity(text_len);
        let mut starts = Vec::with_capacity(collection.len());
        for seq in collection.seqs() {
            starts.push(text.len() as u32);
            text.extend_from_slice(seq.as_bytes());
            text.push(SEPARATOR);
        }

        let mut sa = suffix_array::build(&text);
        sa.retain(|&p| text[p as usize] != SEPARATOR);

        Ok(Self { text, starts, sa })
    }

    /// Number of indexed sequences.
    pub fn num_sequences(&self) -> usize {
        self.starts.len()
    }

    /// Number of indexed residues (suffixes).
    pub fn num_suffixes(&self) -> usize {
        self.sa.len()
    }

    pub fn sequence(&self, sequence_id: usize) -> Option<&[u8]> {
        let start = *self.starts.get(sequence_id)? as usize;
        let end = match self.starts.get(sequence_id + 1) {
            Some(&next) => next as usize - 1,
            None => self.text.len() - 1,
        };
        Some(&self.text[start..end])
    }

    /// Number of occurrences of `pattern`.
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.sa_range(pattern).len()
    }

    /// All occurrences of `pattern`, in suffix-array order.
    pub fn occurrences(&self, pattern: &[u8]) -> Vec<Occurrence> {
        self.sa_range(pattern)
            .map(|i| self.occurrence_at(i))
            .collect()
    }

    /// Interval of suffix-array slots whose suffix starts with `pattern`.
    pub(crate) fn sa_range(&self, pattern: &[u8]) -> Range<usize> {
        if pattern.is_empty() {
            return 0..0;
        }
        let m = pattern.len();
        let lo = self.sa.partition_point(|&p| self.prefix(p, m) < pattern);
        let hi = lo + self.sa[lo..].partition_point(|&p| self.prefix(p, m) <= pattern);
        lo..hi
    }

    pub(crate) fn occurrence_at(&self, slot: usize) -> Occurrence {
        let pos = self.sa[slot];
        let sequence_id = self.starts.partition_point(|&s| s <= pos) - 1;
        Occurrence {
            sequence_id,
            offset: (pos - self.starts[sequence_id]) as usize,
        }
    }

    #[inline]
    fn prefix(&self, pos: u32, m: usize) -> &[u8] {
        let p = pos as usize;
        &self.text[p..(p + m).min(self.text.len())]
    }

    /// Structural checks run on a freshly decoded index.
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        let n = self.text.len();
        if self.text.last().is_some_and(|&b| b != SEPARATOR) {
            return Err("text does not end with a separator".into());
        }
        let separators = self.text.iter().filter(|&&b| b == SEPARATOR).count();
        if separators != self.starts.len() {
            return Err(format!(
                "{} sequence starts but {} separators",
                self.starts.len(),
                separators
            ));
        }
        if self.sa.len() != n - separators {
            return Err(format!(
                "suffix array holds {} entries, expected {}",
                self.sa.len(),
                n - separators
            ));
        }
        let mut expected_start = 0usize;
        for &start in &self.starts {
            if start as usize != expected_start {
                return Err(format!("sequence start {start} out of place"));
            }
            let rest = &self.text[expected_start..];
            let len = rest.iter().position(|&b| b == SEPARATOR).unwrap_or(rest.len());
            expected_start += len + 1;
        }
        if let Some(&bad) = self
            .sa
            .iter()
            .find(|&&p| p as usize >= n || self.text[p as usize] == SEPARATOR)
        {
            return Err(format!("suffix array entry {bad} is not a residue position"));
        }
        Ok(())
    }
}
