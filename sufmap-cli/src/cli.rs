use clap::{builder::PossibleValuesParser, Parser};
use std::path::PathBuf;
use sufmap_core::config::{DEFAULT_BATCH_SIZE, DEFAULT_FLUSH_THRESHOLD};
use sufmap_core::{InputType, MapConfig, MapResult};

#[derive(Debug, Parser)]
#[command(
    name = "sufmap",
    about = "Map peptides to six-frame translated references by exact match",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(
        short = 's',
        long = "sample",
        required = true,
        num_args = 1..,
        help = "Query FASTA/FASTQ file(s) with peptide sequences",
        value_name = "SAMPLE"
    )]
    pub samples: Vec<PathBuf>,

    #[arg(
        short = 'r',
        long = "reference",
        required = true,
        help = "Reference FASTA file",
        value_name = "REFERENCE"
    )]
    pub reference: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        required = true,
        help = "Output GFF file",
        value_name = "OUTPUT"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'i',
        long = "index",
        required = false,
        help = "Index base path, '.sfx' is appended [default: reference path]",
        value_name = "INDEX"
    )]
    pub index: Option<PathBuf>,

    #[arg(
        short = 'y',
        long = "input-type",
        required = true,
        help = "Kind of reference sequences",
        value_name = "TYPE",
        value_parser = PossibleValuesParser::new(["dna", "peptide"])
    )]
    pub input_type: String,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads",
        value_name = "THREADS",
        default_value_t = 1
    )]
    pub threads: usize,

    #[arg(
        long = "batch-size",
        help = "Query records read per fetch",
        value_name = "N",
        default_value_t = DEFAULT_BATCH_SIZE
    )]
    pub batch_size: usize,

    #[arg(
        long = "flush-threshold",
        help = "Buffered hits per thread before writing",
        value_name = "N",
        default_value_t = DEFAULT_FLUSH_THRESHOLD
    )]
    pub flush_threshold: usize,

    #[arg(
        short = 'g',
        long = "genetic-code",
        help = "Genetic code id 0..=18 (0 = standard, 1 = vertebrate mitochondrial, ...)",
        value_name = "ID",
        default_value_t = 0
    )]
    pub genetic_code: u8,

    #[arg(
        long = "store-only",
        help = "Only build and store the index, do not map queries"
    )]
    pub store_only: bool,

    #[arg(
        short = 'L',
        long = "level",
        help = "Logging level",
        value_name = "LEVEL",
        default_value_t = log::Level::Info
    )]
    pub level: log::Level,
}

impl Args {
    pub fn into_config(self) -> MapResult<MapConfig> {
        let input_type: InputType = self.input_type.parse()?;
        let mut config = MapConfig::new(self.samples, self.reference, self.output);
        config.index_path = self.index;
        config.input_type = input_type;
        config.num_threads = self.threads;
        config.batch_size = self.batch_size;
        config.flush_threshold = self.flush_threshold;
        config.genetic_code_id = self.genetic_code;
        config.store_only = self.store_only;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sufmap_core::MapError;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sufmap").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn minimal_arguments() {
        let config = parse(&["-s", "reads.fa", "-r", "ref.fa", "-o", "hits.gff", "-y", "dna"])
            .into_config()
            .unwrap();
        assert_eq!(config.sample_paths, vec![PathBuf::from("reads.fa")]);
        assert_eq!(config.input_type, InputType::Dna);
        assert_eq!(config.num_threads, 1);
        assert_eq!(config.index_file(), PathBuf::from("ref.fa.sfx"));
        assert!(!config.store_only);
    }

    #[test]
    fn all_arguments() {
        let config = parse(&[
            "-s", "a.fq", "b.fa", "-r", "prot.fa", "-o", "out.gff", "-i", "idx/prot", "-y",
            "peptide", "-t", "8", "--batch-size", "500", "--flush-threshold", "250", "-g", "2",
            "--store-only", "-L", "debug",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.sample_paths.len(), 2);
        assert_eq!(config.input_type, InputType::Peptide);
        assert_eq!(config.index_file(), PathBuf::from("idx/prot.sfx"));
        assert_eq!(config.num_threads, 8);
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.flush_threshold, 250);
        assert_eq!(config.genetic_code_id, 2);
        assert!(config.store_only);
    }

    #[test]
    fn unknown_input_type_is_rejected_by_parser() {
        let result = Args::try_parse_from([
            "sufmap", "-s", "q.fa", "-r", "r.fa", "-o", "o.gff", "-y", "rna",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn input_type_is_required() {
        let result = Args::try_parse_from(["sufmap", "-s", "q.fa", "-r", "r.fa", "-o", "o.gff"]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_genetic_code_is_rejected() {
        let err = parse(&["-s", "q.fa", "-r", "r.fa", "-o", "o.gff", "-y", "dna", "-g", "30"])
            .into_config()
            .unwrap_err();
        assert!(matches!(err, MapError::UnknownGeneticCode { id: 30 }));
    }

    #[test]
    fn zero_threads_are_rejected() {
        let err = parse(&["-s", "q.fa", "-r", "r.fa", "-o", "o.gff", "-y", "dna", "-t", "0"])
            .into_config()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidThreadCount { threads: 0 }));
    }
}
