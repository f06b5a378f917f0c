use crate::coords::Strand;
use crate::error::{MapError, MapResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use std::sync::Arc;

const FEATURE_TYPE: &str = "peptide";

/// One peptide hit, 0-based half-open on the forward strand of `reference`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationRecord<'a> {
    pub reference: &'a str,
    pub source: &'a str,
    pub begin: usize,
    pub end: usize,
    pub strand: Strand,
    pub query: Arc<str>,
}

/// Tab-separated GFF output. Coordinates are written 1-based and closed.
pub struct GffWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> GffWriter<W> {
    pub fn new(writer: W) -> Self {
        let inner = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .flexible(false)
            .from_writer(writer);
        Self { inner }
    }

    pub fn write_record(&mut self, record: &AnnotationRecord<'_>) -> MapResult<()> {
        let begin = (record.begin + 1).to_string();
        let end = record.end.to_string();
        let strand = record.strand.to_string();
        let attributes = format!("ID={};Name={}", record.query, record.source);
        self.inner
            .write_record([
                record.reference,
                record.source,
                FEATURE_TYPE,
                begin.as_str(),
                end.as_str(),
                ".",
                strand.as_str(),
                ".",
                attributes.as_str(),
            ])
            .map_err(MapError::OutputCsv)
    }

    pub fn write_all(&mut self, records: &[AnnotationRecord<'_>]) -> MapResult<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> MapResult<()> {
        self.inner.flush().map_err(MapError::OutputIo)
    }

    /// Flushes and hands back the underlying writer.
    pub fn into_inner(self) -> MapResult<W> {
        self.inner
            .into_inner()
            .map_err(|err| MapError::OutputIo(err.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(begin: usize, end: usize, strand: Strand, query: &str) -> AnnotationRecord<'static> {
        AnnotationRecord {
            reference: "chr1",
            source: "reads.fa",
            begin,
            end,
            strand,
            query: query.into(),
        }
    }

    #[test]
    fn writes_one_based_closed_coordinates() {
        let mut writer = GffWriter::new(Vec::new());
        writer
            .write_all(&[
                record(30, 45, Strand::Forward, "q1"),
                record(55, 70, Strand::Reverse, "q2"),
            ])
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "chr1\treads.fa\tpeptide\t31\t45\t.\t+\t.\tID=q1;Name=reads.fa\n\
             chr1\treads.fa\tpeptide\t56\t70\t.\t-\t.\tID=q2;Name=reads.fa\n"
        );
    }

    #[test]
    fn names_are_never_quoted() {
        let mut writer = GffWriter::new(Vec::new());
        writer
            .write_record(&record(0, 3, Strand::Forward, "q \"odd\",name"))
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.ends_with("\tID=q \"odd\",name;Name=reads.fa\n"));
    }

    #[test]
    fn nothing_written_for_no_records() {
        let mut writer = GffWriter::new(Vec::new());
        writer.write_all(&[]).unwrap();
        writer.flush().unwrap();
        assert!(writer.into_inner().unwrap().is_empty());
    }
}
