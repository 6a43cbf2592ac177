use dnaseg_core::discover::{isochore_files, segment_files, TableKind};
use dnaseg_core::pipeline;
use dnaseg_core::{AlignmentStrategy, AnalysisError, IsochoreClass, IsochoreParams, SequenceSet, WordCount};
use std::io::Write;
use tempfile::NamedTempFile;

fn segments_file(rows: &[(u64, u64, &str)]) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tmp csv");
    writeln!(f, "Start,End,Length,Best Word").unwrap();
    for (start, length, word) in rows {
        writeln!(f, "{},{},{},{}", start, start + length, length, word).unwrap();
    }
    f.as_file().sync_all().unwrap();
    f
}

#[test]
fn word_frequency_end_to_end() {
    let f = segments_file(&[(10, 5, "ACG"), (20, 3, "ACG"), (30, 2, "TTT")]);

    let words = pipeline::word_frequency(f.path(), 2).expect("word frequency");
    assert_eq!(words, vec![WordCount::new("ACG", 2)]);
}

#[test]
fn gc_skew_positional_from_sequence_file() {
    let segments = segments_file(&[(999, 4, "A"), (5, 4, "C")]);

    let mut fasta = NamedTempFile::new().expect("tmp fasta");
    writeln!(fasta, ">chr1").unwrap();
    writeln!(fasta, "GGGG").unwrap();
    writeln!(fasta, ">chr2").unwrap();
    writeln!(fasta, "GC").unwrap();
    writeln!(fasta, "CC").unwrap();
    fasta.as_file().sync_all().unwrap();

    let sequences = SequenceSet::load(fasta.path()).expect("load sequences");
    let report = pipeline::gc_skew(segments.path(), Some(&sequences)).expect("gc skew");

    assert_eq!(report.strategy, AlignmentStrategy::Positional);
    assert_eq!(report.points.len(), 2);
    assert_eq!(report.points[0].value, 1.0);
    assert!((report.points[1].value - (-0.5)).abs() < 1e-12);
}

#[test]
fn missing_sequence_file_gives_no_sequence_data() {
    let segments = segments_file(&[(1, 1, "A")]);

    let loaded = SequenceSet::load("/no/such/sequences.fa");
    assert!(matches!(loaded, Err(AnalysisError::NotFound { .. })));

    let err = pipeline::gc_skew(segments.path(), loaded.as_ref().ok()).unwrap_err();
    assert!(matches!(err, AnalysisError::NoSequenceData { .. }));
}

#[test]
fn isochore_views_and_block_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("isochores_output_1.csv");
    let mut text = String::from("Start,GC_Content\n");
    for i in 0..250u64 {
        text.push_str(&format!("{},{}\n", i * 1000, 30.0 + (i % 30) as f64));
    }
    std::fs::write(&input, text).unwrap();

    let files = isochore_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].kind, TableKind::Isochores);

    let views = pipeline::isochore(&files[0].path, &IsochoreParams::default()).unwrap();
    assert_eq!(views.original.len(), 250);
    assert_eq!(views.block_averaged.len(), 3);
    assert_eq!(views.block_averaged[0].end, 99_000);
    assert_eq!(views.moving.len(), 250);
    assert_eq!(views.histogram.bins(), 50);
    assert_eq!(views.histogram.total(), 250);
    assert_eq!(views.classes[0], IsochoreClass::L1);

    let out = files[0].output_path(dir.path(), "simple_average", "tsv");
    pipeline::write_block_table(&out, &views.block_averaged).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(written.starts_with("Start\tEnd\tGC_Content\n0\t99000\t"));
}

#[test]
fn discovery_keeps_merged_files_separate() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["segments_output_1.csv", "merged_segments_output_1.csv"] {
        std::fs::write(dir.path().join(name), "Start,Length,Best Word\n1,2,A\n").unwrap();
    }

    let files = segment_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(
        files.iter().filter(|f| f.kind == TableKind::Segments).count(),
        1
    );
}
