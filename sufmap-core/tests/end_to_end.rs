use std::fs;
use std::path::{Path, PathBuf};
use sufmap_core::pipeline::PipelineStats;
use sufmap_core::{run, InputType, MapConfig, MapError};
use tempfile::TempDir;

const DNA_REFERENCE: &str = "\
>chr1 first
ATGGCCATTGTAATGGGCCGCTGA
AAGGGTGCCCGATAG
>chr2
TTGCCAGGATCCAAATTTGGGCCCTAGCTAGCAT
";

const PEPTIDE_REFERENCE: &str = ">p1\nMKVLAMKV\n>p2\nWWKV\n";

const QUERIES: &str = "\
>q1
MAIVM
>q2
HYNGH
>q3
QWP
>bad
MA-IV
>q4
GPL
>q5
ZZZ
>q6
PNLG
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn dna_config(dir: &TempDir, samples: Vec<PathBuf>) -> MapConfig {
    let reference = write(dir, "ref.fa", DNA_REFERENCE);
    MapConfig::new(samples, reference, dir.path().join("hits.gff"))
}

fn output_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn sorted(mut lines: Vec<String>) -> Vec<String> {
    lines.sort();
    lines
}

fn gff(reference: &str, begin: usize, end: usize, strand: char, query: &str) -> String {
    format!("{reference}\treads.fa\tpeptide\t{begin}\t{end}\t.\t{strand}\t.\tID={query};Name=reads.fa")
}

#[test]
fn dna_mapping_reports_both_strands() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", QUERIES);
    let config = dna_config(&dir, vec![reads]);

    let summary = run(&config).unwrap();
    assert!(summary.index_built);
    assert_eq!(summary.num_references, 2);
    assert_eq!(summary.stats.queries, 6);
    assert_eq!(summary.stats.skipped, 1);
    assert_eq!(summary.stats.hits, 6);
    assert!(dir.path().join("ref.fa.sfx").exists());

    let expected = vec![
        gff("chr1", 1, 15, '+', "q1"),
        gff("chr1", 1, 15, '-', "q2"),
        gff("chr1", 2, 10, '-', "q3"),
        gff("chr1", 15, 23, '+', "q4"),
        gff("chr1", 11, 19, '-', "q4"),
        gff("chr2", 11, 22, '+', "q6"),
    ];
    assert_eq!(sorted(output_lines(&config.output_path)), sorted(expected));
}

#[test]
fn peptide_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write(&dir, "prot.fa", PEPTIDE_REFERENCE);
    let reads = write(&dir, "reads.fa", ">q1\nKV\n>q2\nWWK\n");
    let mut config = MapConfig::new(vec![reads], reference, dir.path().join("hits.gff"));
    config.input_type = InputType::Peptide;

    let summary = run(&config).unwrap();
    assert_eq!(summary.stats.hits, 4);
    let expected = vec![
        gff("p1", 2, 3, '+', "q1"),
        gff("p1", 7, 8, '+', "q1"),
        gff("p2", 3, 4, '+', "q1"),
        gff("p2", 1, 3, '+', "q2"),
    ];
    assert_eq!(sorted(output_lines(&config.output_path)), sorted(expected));
}

#[test]
fn second_run_loads_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", QUERIES);
    let config = dna_config(&dir, vec![reads]);

    assert!(run(&config).unwrap().index_built);
    let first = output_lines(&config.output_path);

    let summary = run(&config).unwrap();
    assert!(!summary.index_built);
    assert_eq!(output_lines(&config.output_path), first);
}

#[test]
fn stale_index_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", ">mito\nRWKG\n");
    let mut config = dna_config(&dir, vec![reads]);

    let summary = run(&config).unwrap();
    assert!(summary.index_built);
    assert_eq!(summary.stats.hits, 0);

    // TGA reads as W under the vertebrate mitochondrial code
    config.genetic_code_id = 1;
    let summary = run(&config).unwrap();
    assert!(summary.index_built);
    assert_eq!(
        output_lines(&config.output_path),
        vec![gff("chr1", 19, 30, '+', "mito")]
    );
    assert!(!run(&config).unwrap().index_built);

    config.input_type = InputType::Peptide;
    assert!(run(&config).unwrap().index_built);
}

#[test]
fn edited_reference_is_reindexed() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", ">q1\nMAIVM\n");
    let config = dna_config(&dir, vec![reads]);
    assert!(run(&config).unwrap().index_built);

    // same number of references, chr1 shifted by one codon
    write(
        &dir,
        "ref.fa",
        &DNA_REFERENCE.replace("ATGGCCATTGTAATG", "CCCATGGCCATTGTAATG"),
    );
    let summary = run(&config).unwrap();
    assert!(summary.index_built);
    assert_eq!(summary.num_references, 2);
    assert!(output_lines(&config.output_path).contains(&gff("chr1", 4, 18, '+', "q1")));
}

#[test]
fn corrupt_index_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", QUERIES);
    let config = dna_config(&dir, vec![reads]);
    fs::write(config.index_file(), b"garbage").unwrap();

    let summary = run(&config).unwrap();
    assert!(summary.index_built);
    assert_eq!(summary.stats.hits, 6);
}

#[test]
fn store_only_builds_without_querying() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = dna_config(&dir, vec![dir.path().join("missing.fa")]);
    config.index_path = Some(dir.path().join("idx"));
    config.store_only = true;

    let summary = run(&config).unwrap();
    assert!(summary.index_built);
    assert!(dir.path().join("idx.sfx").exists());
    assert!(!config.output_path.exists());

    let summary = run(&config).unwrap();
    assert!(!summary.index_built);
}

#[test]
fn empty_query_file_gives_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", "");
    let output = dir.path().join("hits.gff");
    fs::write(&output, "stale contents\n").unwrap();
    let config = dna_config(&dir, vec![reads]);

    let summary = run(&config).unwrap();
    assert_eq!(summary.stats, PipelineStats::default());
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn fastq_queries() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", "@q1\nMAIVM\n+\nIIIII\n@q6\nPNLG\n+\nIIII\n");
    let config = dna_config(&dir, vec![reads]);

    run(&config).unwrap();
    assert_eq!(
        sorted(output_lines(&config.output_path)),
        sorted(vec![
            gff("chr1", 1, 15, '+', "q1"),
            gff("chr2", 11, 22, '+', "q6"),
        ])
    );
}

#[test]
fn samples_are_appended_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(&dir, "first.fa", ">a\nMAIVM\n");
    let second = write(&dir, "second.fq", "@b\nPNLG\n+\n####\n");
    let config = dna_config(&dir, vec![first, second]);

    let summary = run(&config).unwrap();
    assert_eq!(summary.stats.queries, 2);
    let lines = output_lines(&config.output_path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("chr1\tfirst.fa\t"));
    assert!(lines[0].ends_with("ID=a;Name=first.fa"));
    assert!(lines[1].starts_with("chr2\tsecond.fq\t"));
}

#[test]
fn missing_sample_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dna_config(&dir, vec![dir.path().join("missing.fa")]);
    assert!(matches!(run(&config), Err(MapError::Io(_))));
}

fn many_queries() -> String {
    let peptides = ["MAIVM", "GPL", "SKF", "LA", "G", "QWP", "M-A", "PNLG", "KG"];
    (0..300)
        .map(|i| format!(">r{i}\n{}\n", peptides[i % peptides.len()]))
        .collect()
}

#[test]
fn threads_do_not_change_the_records() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write(&dir, "reads.fa", &many_queries());
    let mut config = dna_config(&dir, vec![reads]);
    config.batch_size = 7;
    config.flush_threshold = 5;

    let single = run(&config).unwrap();
    let single_lines = output_lines(&config.output_path);
    run(&config).unwrap();
    assert_eq!(output_lines(&config.output_path), single_lines);

    config.num_threads = 4;
    let parallel = run(&config).unwrap();
    assert_eq!(parallel.stats, single.stats);
    assert_eq!(
        sorted(output_lines(&config.output_path)),
        sorted(single_lines)
    );
}
