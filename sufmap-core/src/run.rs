//! One complete mapping run: references, index, then every sample file.

use crate::config::{InputType, MapConfig};
use crate::coords::CoordinateMapper;
use crate::error::{MapError, MapResult};
use crate::index::{IndexMeta, IndexPlan, StringIndex};
use crate::io::fasta::read_fasta_records_from_path;
use crate::io::gff::GffWriter;
use crate::io::open_seq_records;
use crate::pipeline::{PipelineConfig, PipelineStats, QueryPipeline};
use crate::seq::dna::DnaSeq;
use crate::seq::protein::ProteinSeq;
use crate::seq::{CodonTable, ReferenceSet, SeqRecord, SequenceCollection};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub num_references: usize,
    /// `false` when an existing index file was reused.
    pub index_built: bool,
    /// Totals over all sample files; zero for a store-only run.
    pub stats: PipelineStats,
}

enum References {
    Dna(Vec<SeqRecord<DnaSeq>>),
    Peptide(Vec<SeqRecord<ProteinSeq>>),
}

impl References {
    fn read(path: &Path, input_type: InputType) -> MapResult<Self> {
        let refs = match input_type {
            InputType::Dna => References::Dna(read_fasta_records_from_path(path)?),
            InputType::Peptide => References::Peptide(read_fasta_records_from_path(path)?),
        };
        if refs.is_empty() {
            return Err(MapError::EmptyReference {
                path: path.to_path_buf(),
            });
        }
        Ok(refs)
    }

    fn is_empty(&self) -> bool {
        match self {
            References::Dna(records) => records.is_empty(),
            References::Peptide(records) => records.is_empty(),
        }
    }

    fn reference_set(&self) -> ReferenceSet {
        match self {
            References::Dna(records) => ReferenceSet::from_records(records),
            References::Peptide(records) => ReferenceSet::from_records(records),
        }
    }

    fn into_collection(self, table: &CodonTable) -> SequenceCollection {
        match self {
            References::Dna(records) => SequenceCollection::six_frame(&records, table),
            References::Peptide(records) => SequenceCollection::from_peptides(records),
        }
    }
}

/// Loads or builds the index, then maps every sample file into the output.
pub fn run(config: &MapConfig) -> MapResult<RunSummary> {
    config.validate()?;
    let code = config.genetic_code()?;

    let start = Instant::now();
    let refs = References::read(&config.reference_path, config.input_type)?;
    let references = refs.reference_set();
    log::info!(
        "reading {} references took {:.2?}",
        references.len(),
        start.elapsed()
    );

    let meta = IndexMeta::new(
        config.input_type,
        code,
        references.len(),
        references.total_len(),
    );
    let index_path = config.index_file();
    let start = Instant::now();
    let (index, index_built) = match IndexPlan::probe(&index_path, &meta) {
        IndexPlan::Load(index) => {
            drop(refs);
            log::info!("loading index took {:.2?}", start.elapsed());
            (index, false)
        }
        IndexPlan::Build { .. } => {
            let collection = refs.into_collection(&CodonTable::new(code));
            let index = StringIndex::build(&collection)?;
            drop(collection);
            log::info!(
                "building index over {} residues took {:.2?}",
                index.num_suffixes(),
                start.elapsed()
            );
            let start = Instant::now();
            index.save(&index_path, &meta)?;
            log::info!(
                "saving index to {} took {:.2?}",
                index_path.display(),
                start.elapsed()
            );
            (index, true)
        }
    };

    let mut summary = RunSummary {
        num_references: references.len(),
        index_built,
        stats: PipelineStats::default(),
    };
    if config.store_only {
        log::info!("index stored, skipping queries");
        return Ok(summary);
    }

    let file = File::create(&config.output_path).map_err(MapError::OutputIo)?;
    let mut writer = GffWriter::new(BufWriter::new(file));
    let pipeline = QueryPipeline::new(
        &index,
        &references,
        CoordinateMapper::new(config.input_type),
        PipelineConfig::from(config),
    );

    for sample in &config.sample_paths {
        let start = Instant::now();
        let queries = open_seq_records::<ProteinSeq>(sample)?;
        let label = source_label(sample);
        let stats = pipeline.run(queries, &label, &mut writer)?;
        log::info!(
            "mapping {} queries from {} took {:.2?} ({} hits, {} skipped)",
            stats.queries,
            sample.display(),
            start.elapsed(),
            stats.hits,
            stats.skipped
        );
        summary.stats += stats;
    }

    Ok(summary)
}

/// File name of a sample, used as the GFF source column.
fn source_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
