// crates/plystore-core/tests/header_scan.rs

use plystore_core::header::{scan, ElementDeclaration};
use plystore_core::PlyError;

const CUBE: &[u8] = b"ply\nformat ascii 1.0\ncomment made by hand\nelement vertex 8\nproperty float x\nproperty float y\nelement face 6\nproperty list uchar int vertex_index\nend_header\n";

#[test]
fn declarations_keep_source_order() {
    let h = scan(CUBE).expect("scan ok");
    assert_eq!(
        h.declarations,
        vec![
            ElementDeclaration { name: "vertex".into(), count: 8, ordinal: 0 },
            ElementDeclaration { name: "face".into(), count: 6, ordinal: 1 },
        ]
    );
}

#[test]
fn header_text_stops_before_end_header_delimiter() {
    let h = scan(CUBE).expect("scan ok");
    assert!(h.header_text.starts_with("ply\nformat ascii 1.0\n"));
    assert!(h.header_text.ends_with("\nend_header"));
    assert_eq!(h.body_offset, CUBE.len());
    assert_eq!(h.header_text.len() + 1, h.body_offset);
}

#[test]
fn body_offset_points_past_end_header() {
    let buf = b"ply\nelement v 1\nend_header\nxyz\n";
    let h = scan(buf).unwrap();
    assert_eq!(&buf[h.body_offset..], b"xyz\n");
}

#[test]
fn scanning_stops_at_first_end_header() {
    // body bytes that look like header lines are never classified
    let buf = b"ply\nelement a 1\nend_header\nelement b 9\n";
    let h = scan(buf).unwrap();
    assert_eq!(h.declarations.len(), 1);
    assert_eq!(h.declarations[0].name, "a");
}

#[test]
fn empty_header_line_is_rejected() {
    let err = scan(b"ply\n\nend_header\n").unwrap_err();
    assert_eq!(err, PlyError::EmptyHeaderLine { line: 2 });

    let err = scan(b"ply\n  --  \nend_header\n").unwrap_err();
    assert_eq!(err, PlyError::EmptyHeaderLine { line: 2 });
}

#[test]
fn non_numeric_count_is_malformed() {
    let err = scan(b"ply\nelement vertex abc\nend_header\n").unwrap_err();
    assert!(matches!(err, PlyError::MalformedElementDeclaration { line: 2, .. }));
}

#[test]
fn missing_count_is_malformed() {
    let err = scan(b"ply\nelement vertex\nend_header\n").unwrap_err();
    match err {
        PlyError::MalformedElementDeclaration { line, text } => {
            assert_eq!(line, 2);
            assert_eq!(text, "element vertex");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(matches!(
        scan(b"ply\nelement\nend_header\n").unwrap_err(),
        PlyError::MalformedElementDeclaration { .. }
    ));
}

#[test]
fn extra_words_after_count_are_ignored() {
    let h = scan(b"ply\nelement edge 3 trailing words\nend_header\n").unwrap();
    assert_eq!(h.declarations[0].count, 3);
}

#[test]
fn missing_end_header_is_rejected() {
    assert_eq!(
        scan(b"ply\nelement vertex 2\n").unwrap_err(),
        PlyError::MissingEndHeader
    );
    // an unterminated final line is not a line
    assert_eq!(
        scan(b"ply\nend_header").unwrap_err(),
        PlyError::MissingEndHeader
    );
}

#[test]
fn invalid_utf8_in_header_is_a_decoding_error() {
    let err = scan(b"ply\ncomment \xff\xfe\nend_header\n").unwrap_err();
    assert_eq!(err, PlyError::Decoding { line: 2 });
}

#[test]
fn crlf_lines_keep_carriage_return_in_header_text() {
    let h = scan(b"ply\r\nelement vertex 1\r\nend_header\r\n1\r\n").unwrap();
    assert_eq!(h.declarations[0].count, 1);
    assert!(h.header_text.ends_with("end_header\r"));
}
