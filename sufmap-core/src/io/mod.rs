pub mod detect;
pub mod fasta;
pub mod fastq;
pub mod gff;

use crate::error::MapResult;
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;
use detect::{detect_format, SeqFormat};
use fasta::FastaRecords;
use fastq::FastqRecords;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Records from a FASTA or FASTQ source, whichever the input turned out to be.
pub enum SeqRecords<R, S> {
    Fasta(FastaRecords<R, S>),
    Fastq(FastqRecords<R, S>),
}

impl<R: BufRead, S: SeqBytes> SeqRecords<R, S> {
    pub fn from_reader(mut reader: R) -> MapResult<Self> {
        Ok(match detect_format(&mut reader)? {
            SeqFormat::Fasta => SeqRecords::Fasta(FastaRecords::new(reader)),
            SeqFormat::Fastq => SeqRecords::Fastq(FastqRecords::new(reader)),
        })
    }

    pub fn format(&self) -> SeqFormat {
        match self {
            SeqRecords::Fasta(_) => SeqFormat::Fasta,
            SeqRecords::Fastq(_) => SeqFormat::Fastq,
        }
    }
}

impl<R: BufRead, S: SeqBytes> Iterator for SeqRecords<R, S> {
    type Item = MapResult<SeqRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SeqRecords::Fasta(records) => records.next(),
            SeqRecords::Fastq(records) => records.next(),
        }
    }
}

/// Opens a sequence file of either format for streaming.
pub fn open_seq_records<S: SeqBytes>(
    path: impl AsRef<Path>,
) -> MapResult<SeqRecords<BufReader<File>, S>> {
    let file = File::open(path)?;
    SeqRecords::from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::protein::ProteinSeq;
    use std::io::Cursor;

    fn ids(records: SeqRecords<Cursor<&[u8]>, ProteinSeq>) -> Vec<String> {
        records.map(|r| r.unwrap().id().to_string()).collect()
    }

    #[test]
    fn reads_fasta_queries() {
        let records = SeqRecords::from_reader(Cursor::new(&b">q1\nMKV\n>q2\nWW\n"[..])).unwrap();
        assert_eq!(records.format(), SeqFormat::Fasta);
        assert_eq!(ids(records), vec!["q1", "q2"]);
    }

    #[test]
    fn reads_fastq_queries() {
        let data = &b"\n@q1\nMKV\n+\n!!!\n@q2\nWW\n+\n!!\n"[..];
        let records = SeqRecords::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(records.format(), SeqFormat::Fastq);
        assert_eq!(ids(records), vec!["q1", "q2"]);
    }

    #[test]
    fn empty_source_yields_nothing() {
        let records = SeqRecords::from_reader(Cursor::new(&b""[..])).unwrap();
        assert!(ids(records).is_empty());
    }

    #[test]
    fn open_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fq");
        std::fs::write(&path, "@r1\nMKVL\n+\nIIII\n").unwrap();
        let records: Vec<_> = open_seq_records::<ProteinSeq>(&path)
            .unwrap()
            .collect::<MapResult<_>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq().as_bytes(), b"MKVL");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_seq_records::<ProteinSeq>(dir.path().join("nope.fa")).is_err());
    }
}
