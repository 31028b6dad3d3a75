// crates/plystore-core/tests/document_parse.rs

use plystore_core::{Document, PlyError};

const HEADER: &str = "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nend_header\n";

#[test]
fn happy_path_single_element() {
    let input = format!("{HEADER}1.0\n2.0\n");
    let doc = Document::parse(input.as_bytes()).expect("parse ok");

    assert_eq!(
        doc.header_text,
        "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nend_header"
    );
    let decls: Vec<_> = doc.declarations().map(|d| (d.name.as_str(), d.count)).collect();
    assert_eq!(decls, vec![("vertex", 2)]);

    let (decl, bytes) = doc.element_bytes().next().unwrap();
    assert_eq!(decl.name, "vertex");
    assert_eq!(bytes, b"1.0\n2.0\n");
    assert_eq!(doc.body_end(), input.len());
}

#[test]
fn truncated_body_fails_without_partial_document() {
    let input = format!("{HEADER}1.0\n");
    let err = Document::parse(input.as_bytes()).unwrap_err();
    assert!(matches!(err, PlyError::TruncatedElementBody { ref element, .. } if element == "vertex"));
}

#[test]
fn malformed_declaration_fails_before_body() {
    let err = Document::parse(b"ply\nelement vertex abc\nend_header\n1\n").unwrap_err();
    assert!(matches!(err, PlyError::MalformedElementDeclaration { .. }));
}

#[test]
fn multi_element_records_drop_final_delimiter() {
    let input = b"ply\nelement vertex 2\nelement face 1\nend_header\na\nb\nc\n";
    let doc = Document::parse(input).unwrap();

    let spans: Vec<_> = doc.element_bytes().map(|(d, b)| (d.name.clone(), b.to_vec())).collect();
    assert_eq!(spans[0], ("vertex".to_string(), b"a\nb\n".to_vec()));
    assert_eq!(spans[1], ("face".to_string(), b"c\n".to_vec()));

    let records: Vec<_> = doc.element_records().map(|(_, b)| b.to_vec()).collect();
    assert_eq!(records, vec![b"a\nb".to_vec(), b"c".to_vec()]);
}

#[test]
fn header_without_elements_has_empty_body() {
    let input = b"ply\ncomment nothing here\nend_header\n";
    let doc = Document::parse(input).unwrap();
    assert!(doc.elements.is_empty());
    assert_eq!(doc.body_offset(), input.len());
    assert_eq!(doc.body_end(), input.len());
}

#[test]
fn binary_payload_after_text_header() {
    let mut input = b"ply\nformat binary_little_endian 1.0\nelement vertex 1\nend_header\n".to_vec();
    let body = [0x00u8, 0x00, 0x80, 0x3f, b'\n'];
    input.extend_from_slice(&body);

    let doc = Document::parse(&input).unwrap();
    let (_, bytes) = doc.element_bytes().next().unwrap();
    assert_eq!(bytes, &body);
}

#[test]
fn parse_is_deterministic() {
    let input = format!("{HEADER}1.0\n2.0\n");
    let a = Document::parse(input.as_bytes()).unwrap();
    let b = Document::parse(input.as_bytes()).unwrap();
    assert_eq!(a.header_text, b.header_text);
    assert_eq!(a.elements, b.elements);
}
