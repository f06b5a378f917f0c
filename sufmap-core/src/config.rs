use crate::error::{MapError, MapResult};
use crate::index::persist::index_file_path;
use crate::seq::GeneticCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_BATCH_SIZE: usize = 100_000;
pub const DEFAULT_FLUSH_THRESHOLD: usize = DEFAULT_BATCH_SIZE;

/// What the reference file holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    /// Nucleotides, indexed through six-frame translation.
    #[default]
    Dna,
    /// Amino acids, indexed as-is.
    Peptide,
}

impl InputType {
    /// Collection entries per reference sequence.
    pub fn entries_per_reference(self) -> usize {
        match self {
            InputType::Dna => 6,
            InputType::Peptide => 1,
        }
    }
}

impl FromStr for InputType {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dna" => Ok(InputType::Dna),
            "peptide" => Ok(InputType::Peptide),
            _ => Err(MapError::InvalidInputType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Dna => f.write_str("dna"),
            InputType::Peptide => f.write_str("peptide"),
        }
    }
}

/// Everything one mapping run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapConfig {
    pub sample_paths: Vec<PathBuf>,
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    /// Base path of the index file; `None` means the reference path.
    pub index_path: Option<PathBuf>,
    pub input_type: InputType,
    pub num_threads: usize,
    pub batch_size: usize,
    pub flush_threshold: usize,
    pub genetic_code_id: u8,
    /// Stop once the index is on disk.
    pub store_only: bool,
}

impl MapConfig {
    pub fn new(
        sample_paths: Vec<PathBuf>,
        reference_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sample_paths,
            reference_path: reference_path.into(),
            output_path: output_path.into(),
            index_path: None,
            input_type: InputType::default(),
            num_threads: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            genetic_code_id: 0,
            store_only: false,
        }
    }

    /// Checks every setting that can be judged without touching the filesystem.
    pub fn validate(&self) -> MapResult<()> {
        GeneticCode::from_id(self.genetic_code_id)?;
        if self.num_threads == 0 {
            return Err(MapError::InvalidThreadCount {
                threads: self.num_threads,
            });
        }
        if self.batch_size == 0 {
            return Err(MapError::InvalidBatchSize {
                name: "batch size",
                value: self.batch_size,
            });
        }
        if self.flush_threshold == 0 {
            return Err(MapError::InvalidBatchSize {
                name: "flush threshold",
                value: self.flush_threshold,
            });
        }
        Ok(())
    }

    pub fn genetic_code(&self) -> MapResult<GeneticCode> {
        GeneticCode::from_id(self.genetic_code_id)
    }

    pub fn index_base(&self) -> &Path {
        self.index_path.as_deref().unwrap_or(&self.reference_path)
    }

    /// Location of the index file on disk.
    pub fn index_file(&self) -> PathBuf {
        index_file_path(self.index_base())
    }
}
