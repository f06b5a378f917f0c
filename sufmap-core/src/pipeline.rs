//! Parallel search of a query stream against one index.
//!
//! Every worker repeats fetch, search and emit. Fetching and emitting each
//! take their own lock, so one worker can read queries while another writes
//! hits. Hits of a single query are always written together.

use crate::config::{MapConfig, DEFAULT_BATCH_SIZE, DEFAULT_FLUSH_THRESHOLD};
use crate::coords::CoordinateMapper;
use crate::error::{MapError, MapResult};
use crate::index::{Finder, StringIndex};
use crate::io::gff::{AnnotationRecord, GffWriter};
use crate::seq::protein::ProteinSeq;
use crate::seq::{ReferenceSet, SeqRecord};
use parking_lot::Mutex;
use std::io::Write;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Query = SeqRecord<ProteinSeq>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub num_threads: usize,
    /// Records pulled from the source per fetch.
    pub batch_size: usize,
    /// Buffered hits above which a worker writes out.
    pub flush_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_threads: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

impl From<&MapConfig> for PipelineConfig {
    fn from(config: &MapConfig) -> Self {
        Self {
            num_threads: config.num_threads,
            batch_size: config.batch_size,
            flush_threshold: config.flush_threshold,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Queries searched.
    pub queries: usize,
    /// Malformed query records dropped.
    pub skipped: usize,
    /// Records written.
    pub hits: usize,
}

impl AddAssign for PipelineStats {
    fn add_assign(&mut self, rhs: Self) {
        self.queries += rhs.queries;
        self.skipped += rhs.skipped;
        self.hits += rhs.hits;
    }
}

struct QuerySource<I> {
    records: I,
    exhausted: bool,
}

impl<I: Iterator<Item = MapResult<Query>>> QuerySource<I> {
    /// Pulls up to `n` records into `batch`. Malformed records use up a slot
    /// and are not replaced.
    fn fill(
        &mut self,
        batch: &mut Vec<Query>,
        n: usize,
        stats: &mut PipelineStats,
    ) -> MapResult<()> {
        for _ in 0..n {
            if self.exhausted {
                break;
            }
            match self.records.next() {
                Some(Ok(record)) => batch.push(record),
                Some(Err(err)) if err.is_record_error() => {
                    log::warn!("skipping query record: {err}");
                    stats.skipped += 1;
                }
                Some(Err(err)) => {
                    self.exhausted = true;
                    return Err(err);
                }
                None => self.exhausted = true,
            }
        }
        Ok(())
    }
}

pub struct QueryPipeline<'a> {
    index: &'a StringIndex,
    references: &'a ReferenceSet,
    mapper: CoordinateMapper,
    config: PipelineConfig,
}

impl<'a> QueryPipeline<'a> {
    pub fn new(
        index: &'a StringIndex,
        references: &'a ReferenceSet,
        mapper: CoordinateMapper,
        config: PipelineConfig,
    ) -> Self {
        Self {
            index,
            references,
            mapper,
            config,
        }
    }

    /// Searches every query from `queries` and writes the hits to `out`,
    /// labelled with `source`. Returns once all workers have stopped; the
    /// first error any worker hit is returned.
    pub fn run<I, W>(
        &self,
        queries: I,
        source: &str,
        out: &mut GffWriter<W>,
    ) -> MapResult<PipelineStats>
    where
        I: Iterator<Item = MapResult<Query>> + Send,
        W: Write + Send,
    {
        let num_threads = self.config.num_threads.max(1);
        let input = Mutex::new(QuerySource {
            records: queries,
            exhausted: false,
        });
        let output = Mutex::new(&mut *out);
        let abort = AtomicBool::new(false);

        let results: Vec<MapResult<PipelineStats>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..num_threads)
                .map(|worker| {
                    let (input, output, abort) = (&input, &output, &abort);
                    s.spawn(move || {
                        let result = self.worker(input, output, abort, source);
                        match &result {
                            Ok(stats) => log::debug!(
                                "worker {worker}: {} queries, {} hits",
                                stats.queries,
                                stats.hits
                            ),
                            Err(_) => abort.store(true, Ordering::Relaxed),
                        }
                        result
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        drop(output);

        let mut total = PipelineStats::default();
        for result in results {
            total += result?;
        }
        out.flush()?;
        Ok(total)
    }

    fn worker<I, W>(
        &self,
        input: &Mutex<QuerySource<I>>,
        output: &Mutex<&mut GffWriter<W>>,
        abort: &AtomicBool,
        source: &str,
    ) -> MapResult<PipelineStats>
    where
        I: Iterator<Item = MapResult<Query>>,
        W: Write,
    {
        let mut finder = Finder::new(self.index);
        let mut batch = Vec::with_capacity(self.config.batch_size.min(4096));
        let mut buffer = Vec::new();
        let mut stats = PipelineStats::default();

        loop {
            if abort.load(Ordering::Relaxed) {
                return Ok(stats);
            }
            let exhausted = {
                let mut input = input.lock();
                input.fill(&mut batch, self.config.batch_size, &mut stats)?;
                input.exhausted
            };
            if batch.is_empty() {
                if exhausted {
                    break;
                }
                continue;
            }

            for query in batch.drain(..) {
                stats.queries += 1;
                self.search(&mut finder, query, source, &mut buffer);
                if buffer.len() > self.config.flush_threshold {
                    stats.hits += emit(output, &mut buffer)?;
                }
            }
        }

        stats.hits += emit(output, &mut buffer)?;
        Ok(stats)
    }

    fn search<'s>(
        &self,
        finder: &mut Finder<'_>,
        query: Query,
        source: &'s str,
        buffer: &mut Vec<AnnotationRecord<'s>>,
    ) where
        'a: 's,
    {
        let (name, seq) = query.into_parts();
        let name: Arc<str> = name.into();
        let pattern = seq.as_bytes();

        finder.clear();
        while let Some(occurrence) = finder.find_next(pattern) {
            let Some(hit) = self.mapper.map(occurrence, pattern.len(), self.references) else {
                continue;
            };
            let Some(reference) = self.references.name(hit.reference_id) else {
                continue;
            };
            buffer.push(AnnotationRecord {
                reference,
                source,
                begin: hit.begin,
                end: hit.end,
                strand: hit.strand,
                query: Arc::clone(&name),
            });
        }
    }
}

fn emit<W: Write>(
    output: &Mutex<&mut GffWriter<W>>,
    buffer: &mut Vec<AnnotationRecord<'_>>,
) -> MapResult<usize> {
    if buffer.is_empty() {
        return Ok(0);
    }
    let written = buffer.len();
    output.lock().write_all(buffer)?;
    buffer.clear();
    Ok(written)
}
