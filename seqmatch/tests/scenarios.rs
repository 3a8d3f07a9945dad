use seqmatch::align::{AlignMode, Scoring};
use seqmatch::motif;
use seqmatch::InvalidInputError;

#[test]
fn search_gattaca_for_aca() {
    let hit = motif::search(b"ACA", b"GATTACA$").unwrap();
    assert_eq!(hit.count, 1);
    assert_eq!(hit.offsets, vec![4]);
}

#[test]
fn global_gattaca_gcatgcu() {
    let aln = motif::align(b"GATTACA", b"GCATGCU", &Scoring::new(1, -1, -2), AlignMode::Global).unwrap();
    assert_eq!(aln.gapped_a, "GATTACA");
    assert_eq!(aln.markers, "*||*|*|");
    assert_eq!(aln.gapped_b, "GCATGCU");
    assert_eq!(aln.score, -1);
    assert_eq!(
        motif::score_only(b"GATTACA", b"GCATGCU", &Scoring::new(1, -1, -2), AlignMode::Global).unwrap(),
        -1
    );
}

#[test]
fn local_tgttacgg_ggttgacta() {
    let aln = motif::align(b"TGTTACGG", b"GGTTGACTA", &Scoring::new(1, -1, -1), AlignMode::Local).unwrap();
    assert_eq!(aln.gapped_a, "GTT-AC");
    assert_eq!(aln.markers, "*** **");
    assert_eq!(aln.gapped_b, "GTTGAC");
    assert_eq!(aln.score, 4);
    assert_eq!(aln.a_span, (1, 6));
    assert_eq!(aln.b_span, (1, 7));
    assert_eq!(
        motif::score_only(b"TGTTACGG", b"GGTTGACTA", &Scoring::new(1, -1, -1), AlignMode::Local).unwrap(),
        4
    );
}

#[test]
fn empty_pattern_is_zero_matches() {
    for text in [&b"GATTACA"[..], b"A", b"$"] {
        let hit = motif::search(b"", text).unwrap();
        assert_eq!(hit.count, 0);
        assert!(hit.offsets.is_empty());
    }
    assert_eq!(motif::count_occurrences(b"", b"GATTACA").unwrap(), 0);
    assert!(motif::locate_occurrences(b"", b"GATTACA").unwrap().is_empty());
}

#[test]
fn unknown_mode_is_invalid_input() {
    let err = "needleman".parse::<AlignMode>().unwrap_err();
    assert_eq!(err, InvalidInputError::UnknownMode("needleman".to_string()));
    assert!(err.to_string().contains("needleman"));
}
