//! Integration tests for the Splice parser against fixture files.

use sp_formats::{decode_bytes, decode_file, DecodeError};
use sp_ir::{render, Pattern, Tempo};
use std::fs;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/splice")
}

fn load_fixture(name: &str) -> Pattern {
    let path = fixtures_dir().join(name);
    decode_file(&path).unwrap_or_else(|e| panic!("Failed to decode {}: {}", path.display(), e))
}

fn assert_pattern_invariants(pattern: &Pattern) {
    let text = render(pattern);
    let track_lines: Vec<&str> = text.lines().skip(2).collect();
    assert_eq!(track_lines.len(), pattern.tracks.len());

    for (line, track) in track_lines.iter().zip(&pattern.tracks) {
        let prefix = format!("({}) ", track.id());
        assert!(line.starts_with(&prefix), "{:?} should start with {:?}", line, prefix);

        let (_, steps) = line.rsplit_once('\t').expect("tab before step line");
        assert_eq!(steps.matches('|').count(), 5, "separators in {:?}", steps);
        assert_eq!(steps.chars().filter(|&c| c == 'x' || c == '-').count(), 16);
    }
}

// --- pattern_1.splice ---

#[test]
fn pattern_1_renders() {
    let pattern = load_fixture("pattern_1.splice");
    assert_pattern_invariants(&pattern);

    assert_eq!(pattern.name, "pattern_1.splice");
    assert_eq!(
        render(&pattern),
        "Saved with HW Version: 0.808-alpha\n\
         Tempo: 120\n\
         (0) kick\t|x---|x---|x---|x---|\n\
         (1) snare\t|----|x---|----|x---|\n\
         (2) clap\t|----|x-x-|----|----|\n\
         (3) hh-open\t|--x-|--x-|x-x-|--x-|\n\
         (4) hh-close\t|x---|x---|----|x--x|\n\
         (5) cowbell\t|----|----|--x-|----|\n"
    );
}

// --- pattern_2.splice ---

#[test]
fn pattern_2_has_fractional_tempo() {
    let pattern = load_fixture("pattern_2.splice");
    assert_pattern_invariants(&pattern);

    assert_eq!(pattern.tempo(), Tempo::Fractional);
    assert_eq!(
        render(&pattern),
        "Saved with HW Version: 0.808-alpha\n\
         Tempo: 98.4\n\
         (0) kick\t|x---|----|x---|----|\n\
         (1) snare\t|----|x---|----|x---|\n\
         (3) hh-open\t|--x-|--x-|x-x-|--x-|\n\
         (5) cowbell\t|----|----|x---|----|\n"
    );
}

// --- pattern_3.splice ---

#[test]
fn pattern_3_keeps_file_order() {
    let pattern = load_fixture("pattern_3.splice");
    assert_pattern_invariants(&pattern);

    let ids: Vec<u8> = pattern.tracks.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![40, 1, 3, 5, 12, 9]);
    assert_eq!(
        render(&pattern),
        "Saved with HW Version: 0.808-alpha\n\
         Tempo: 118\n\
         (40) kick\t|x---|----|x---|----|\n\
         (1) clap\t|----|x---|----|x---|\n\
         (3) hh-open\t|--x-|--x-|x-x-|--x-|\n\
         (5) low-tom\t|----|---x|----|----|\n\
         (12) mid-tom\t|----|----|x---|----|\n\
         (9) hi-tom\t|----|----|-x--|----|\n"
    );
}

// --- pattern_4.splice ---

#[test]
fn pattern_4_offset_tempo() {
    let pattern = load_fixture("pattern_4.splice");
    assert_pattern_invariants(&pattern);

    assert_eq!(pattern.tempo().bpm(), Some(240));
    assert_eq!(
        render(&pattern),
        "Saved with HW Version: 0.909\n\
         Tempo: 240\n\
         (0) SubKick\t|----|----|----|----|\n\
         (1) Kick\t|x---|----|x---|----|\n\
         (99) Maracas\t|x-x-|x-x-|x-x-|x-x-|\n\
         (255) Low Conga\t|----|x---|----|----|\n"
    );
}

// --- pattern_5.splice ---

#[test]
fn pattern_5_stops_at_sentinel() {
    let pattern = load_fixture("pattern_5.splice");
    assert_pattern_invariants(&pattern);

    assert_eq!(pattern.tracks.len(), 2);
    assert_eq!(
        render(&pattern),
        "Saved with HW Version: 0.708-alpha\n\
         Tempo: 999\n\
         (1) Kick\t|x---|----|x---|----|\n\
         (2) HiHat\t|x-x-|x-x-|x-x-|x-x-|\n"
    );
}

// --- cross-cutting ---

#[test]
fn decoding_is_deterministic() {
    for name in ["pattern_1.splice", "pattern_3.splice", "pattern_5.splice"] {
        let data = fs::read(fixtures_dir().join(name)).unwrap();
        let a = render(&decode_bytes(&data, name).unwrap());
        let b = render(&decode_bytes(&data, name).unwrap());
        assert_eq!(a, b, "{}", name);
    }
}

#[test]
fn truncated_fixture_fails_cleanly() {
    let data = fs::read(fixtures_dir().join("pattern_1.splice")).unwrap();

    let err = decode_bytes(&data[..30], "cut").unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedHeader(_)));

    // Cut inside the last track's step grid.
    let err = decode_bytes(&data[..data.len() - 3], "cut").unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedStepGrid { track: 5, .. }));
}

#[test]
fn header_prefix_alone_decodes_to_no_tracks() {
    let data = fs::read(fixtures_dir().join("pattern_4.splice")).unwrap();
    let pattern = decode_bytes(&data[..50], "head").unwrap();
    assert!(pattern.tracks.is_empty());
    assert_eq!(render(&pattern), "Saved with HW Version: 0.909\nTempo: 240\n");
}

#[test]
fn decode_file_names_pattern_after_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.splice");
    fs::copy(fixtures_dir().join("pattern_2.splice"), &path).unwrap();

    let pattern = decode_file(&path).unwrap();
    assert_eq!(pattern.name, "copy.splice");
    assert_eq!(pattern.tracks.len(), 4);
}

#[test]
fn decode_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = decode_file(dir.path().join("nope.splice")).unwrap_err();
    assert!(matches!(err, DecodeError::Io(_)));
}

#[test]
fn decode_file_reports_short_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"SPLICE").unwrap();
    let err = decode_file(file.path()).unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedHeader(_)));
}
