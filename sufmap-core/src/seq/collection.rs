use crate::error::{MapError, MapResult};
use crate::seq::dna::DnaSeq;
use crate::seq::genetic_code::CodonTable;
use crate::seq::protein::ProteinSeq;
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;

/// Protein sequences addressed by dense IDs `0..len` in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceCollection {
    names: Vec<Box<str>>,
    seqs: Vec<ProteinSeq>,
    lengths: Vec<usize>,
}

impl SequenceCollection {
    pub fn new(names: Vec<Box<str>>, seqs: Vec<ProteinSeq>) -> MapResult<Self> {
        if names.len() != seqs.len() {
            return Err(MapError::CollectionLenMismatch {
                ids: seqs.len(),
                names: names.len(),
                seqs: seqs.len(),
            });
        }
        let lengths = seqs.iter().map(|s| s.len()).collect();
        Ok(Self {
            names,
            seqs,
            lengths,
        })
    }

    /// One entry per reference, inserted as-is.
    pub fn from_peptides(records: Vec<SeqRecord<ProteinSeq>>) -> Self {
        let mut names = Vec::with_capacity(records.len());
        let mut seqs = Vec::with_capacity(records.len());
        let mut lengths = Vec::with_capacity(records.len());
        for record in records {
            let (name, seq) = record.into_parts();
            lengths.push(seq.len());
            names.push(name);
            seqs.push(seq);
        }
        Self {
            names,
            seqs,
            lengths,
        }
    }

    /// Six entries per reference: entry `6k + f` is frame `f` of reference `k`.
    pub fn six_frame(records: &[SeqRecord<DnaSeq>], table: &CodonTable) -> Self {
        let translated: Vec<[ProteinSeq; 6]> = par_map!(records, |record: &SeqRecord<DnaSeq>| {
            record.seq().six_frame(table)
        });

        let mut names = Vec::with_capacity(records.len() * 6);
        let mut seqs = Vec::with_capacity(records.len() * 6);
        let mut lengths = Vec::with_capacity(records.len() * 6);
        for (record, frames) in records.iter().zip(translated) {
            for seq in frames {
                names.push(record.id.clone());
                lengths.push(seq.len());
                seqs.push(seq);
            }
        }
        Self {
            names,
            seqs,
            lengths,
        }
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(|s| s.as_ref())
    }

    pub fn seq(&self, id: usize) -> Option<&ProteinSeq> {
        self.seqs.get(id)
    }

    pub fn seqs(&self) -> &[ProteinSeq] {
        &self.seqs
    }

    pub fn names(&self) -> &[Box<str>] {
        &self.names
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Sum of all sequence lengths.
    pub fn total_len(&self) -> usize {
        self.lengths.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &ProteinSeq)> {
        self.names
            .iter()
            .zip(&self.seqs)
            .enumerate()
            .map(|(id, (name, seq))| (id, name.as_ref(), seq))
    }
}

/// Reference names and their untranslated lengths, indexed by reference ID.
/// This is all a query run needs once the index exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    names: Vec<Box<str>>,
    original_lengths: Vec<usize>,
}

impl ReferenceSet {
    pub fn from_records<S: SeqBytes>(records: &[SeqRecord<S>]) -> Self {
        Self {
            names: records.iter().map(|r| r.id.clone()).collect(),
            original_lengths: records.iter().map(|r| r.seq.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, reference_id: usize) -> Option<&str> {
        self.names.get(reference_id).map(|s| s.as_ref())
    }

    pub fn original_len(&self, reference_id: usize) -> Option<usize> {
        self.original_lengths.get(reference_id).copied()
    }

    /// Sum of untranslated reference lengths.
    pub fn total_len(&self) -> usize {
        self.original_lengths.iter().sum()
    }
}
