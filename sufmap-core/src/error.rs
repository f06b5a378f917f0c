use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("invalid frame: {frame} (must be 0..=5)")]
    InvalidFrame { frame: u8 },

    #[error("unknown genetic code id {id} (expected 0..=18)")]
    UnknownGeneticCode { id: u8 },

    #[error("invalid input type '{value}' (expected 'dna' or 'peptide')")]
    InvalidInputType { value: String },

    #[error("invalid thread count: {threads} (must be at least 1)")]
    InvalidThreadCount { threads: usize },

    #[error("invalid {name}: {value} (must be at least 1)")]
    InvalidBatchSize { name: &'static str, value: usize },

    #[error("fasta format error at line {line}: {msg}")]
    FastaFormat { msg: &'static str, line: usize },

    #[error("fastq format error at line {line}: {msg}")]
    FastqFormat { msg: &'static str, line: usize },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("reference file {path} does not contain any sequences")]
    EmptyReference { path: PathBuf },

    #[error("collection length mismatch (ids={ids}, names={names}, seqs={seqs})")]
    CollectionLenMismatch {
        ids: usize,
        names: usize,
        seqs: usize,
    },

    #[error("indexed text too large: {len} residues (limit {limit})")]
    IndexTooLarge { len: usize, limit: usize },

    #[error("index io error on {path}: {source}")]
    IndexIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not encode index to {path}: {source}")]
    IndexEncode {
        path: PathBuf,
        #[source]
        source: bincode::error::EncodeError,
    },

    #[error("could not decode index {path}: {source}")]
    IndexDecode {
        path: PathBuf,
        #[source]
        source: bincode::error::DecodeError,
    },

    #[error("corrupt index {path}: {msg}")]
    IndexCorrupt { path: PathBuf, msg: String },

    #[error("index {path} was built for {found}, this run needs {expected}")]
    IndexMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    #[error("output io error: {0}")]
    OutputIo(#[source] io::Error),

    #[error("output write error: {0}")]
    OutputCsv(#[source] csv::Error),
}

impl MapError {
    /// Errors confined to a single input record; the stream can continue past them.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            MapError::InvalidChar { .. }
                | MapError::FastaFormat { .. }
                | MapError::FastqFormat { .. }
        )
    }
}

pub type MapResult<T> = Result<T, MapError>;
