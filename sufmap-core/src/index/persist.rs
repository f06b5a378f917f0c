//! On-disk form of a [`StringIndex`].
//!
//! One file holds an [`IndexHeader`] followed by the index body, both bincode
//! encoded. The header is decoded first so a stale or foreign file is turned
//! away before the large tables are read.

use crate::config::InputType;
use crate::error::{MapError, MapResult};
use crate::index::StringIndex;
use crate::seq::GeneticCode;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const MAGIC: [u8; 8] = *b"SUFMAPIX";
const FORMAT_VERSION: u32 = 1;
const EXTENSION: &str = "sfx";

/// What an index was built from. A load only succeeds when this matches the
/// current run exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub input_type: InputType,
    /// Only meaningful for DNA input.
    pub genetic_code: Option<GeneticCode>,
    pub num_sequences: usize,
    /// Summed untranslated reference lengths. Catches edited references that
    /// keep the same sequence count.
    pub reference_residues: usize,
}

impl IndexMeta {
    pub fn new(
        input_type: InputType,
        code: GeneticCode,
        num_references: usize,
        reference_residues: usize,
    ) -> Self {
        let genetic_code = match input_type {
            InputType::Dna => Some(code),
            InputType::Peptide => None,
        };
        Self {
            input_type,
            genetic_code,
            num_sequences: num_references * input_type.entries_per_reference(),
            reference_residues,
        }
    }
}

impl fmt::Display for IndexMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} input", self.input_type)?;
        if let Some(code) = self.genetic_code {
            write!(f, ", {code}")?;
        }
        write!(
            f,
            ", {} sequences, {} reference residues",
            self.num_sequences, self.reference_residues
        )
    }
}

#[derive(Serialize, Deserialize)]
struct IndexHeader {
    magic: [u8; 8],
    version: u32,
    meta: IndexMeta,
}

/// `base` with `.sfx` appended, never replacing an existing extension.
pub fn index_file_path(base: &Path) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

impl StringIndex {
    pub fn save(&self, path: &Path, meta: &IndexMeta) -> MapResult<()> {
        let io_err = |source| MapError::IndexIo {
            path: path.to_path_buf(),
            source,
        };
        let encode_err = |source| MapError::IndexEncode {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        let header = IndexHeader {
            magic: MAGIC,
            version: FORMAT_VERSION,
            meta: *meta,
        };
        let config = bincode::config::standard();
        bincode::serde::encode_into_std_write(&header, &mut out, config).map_err(encode_err)?;
        bincode::serde::encode_into_std_write(self, &mut out, config).map_err(encode_err)?;
        out.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn load(path: &Path, expected: &IndexMeta) -> MapResult<Self> {
        let decode_err = |source| MapError::IndexDecode {
            path: path.to_path_buf(),
            source,
        };
        let corrupt = |msg: String| MapError::IndexCorrupt {
            path: path.to_path_buf(),
            msg,
        };

        let file = File::open(path).map_err(|source| MapError::IndexIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut input = BufReader::new(file);
        let config = bincode::config::standard();

        let header: IndexHeader =
            bincode::serde::decode_from_std_read(&mut input, config).map_err(decode_err)?;
        if header.magic != MAGIC {
            return Err(corrupt("not a sufmap index".into()));
        }
        if header.version != FORMAT_VERSION {
            return Err(corrupt(format!(
                "format version {} (supported: {FORMAT_VERSION})",
                header.version
            )));
        }
        if header.meta != *expected {
            return Err(MapError::IndexMismatch {
                path: path.to_path_buf(),
                found: header.meta.to_string(),
                expected: expected.to_string(),
            });
        }

        let index: StringIndex =
            bincode::serde::decode_from_std_read(&mut input, config).map_err(decode_err)?;
        index.check_consistency().map_err(corrupt)?;
        if index.num_sequences() != header.meta.num_sequences {
            return Err(corrupt(format!(
                "header lists {} sequences, body holds {}",
                header.meta.num_sequences,
                index.num_sequences()
            )));
        }
        Ok(index)
    }
}

/// Outcome of looking for a usable index on disk.
#[derive(Debug)]
pub enum IndexPlan {
    Load(StringIndex),
    Build { reason: MapError },
}

impl IndexPlan {
    /// Tries to load `path`; any failure becomes a reason to build.
    pub fn probe(path: &Path, expected: &IndexMeta) -> Self {
        match StringIndex::load(path, expected) {
            Ok(index) => {
                log::info!("loaded index {}", path.display());
                IndexPlan::Load(index)
            }
            Err(reason) => {
                log::info!("building index: {reason}");
                IndexPlan::Build { reason }
            }
        }
    }
}
