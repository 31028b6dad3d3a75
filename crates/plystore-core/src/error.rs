use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlyError>;

/// Parse and chunking failures. Header positions are 1-based line numbers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlyError {
    #[error("empty header line {line}")]
    EmptyHeaderLine { line: usize },

    #[error("malformed element declaration on header line {line}: {text:?}")]
    MalformedElementDeclaration { line: usize, text: String },

    #[error("truncated body for element '{element}': expected {expected} lines, found {found}")]
    TruncatedElementBody {
        element: String,
        expected: u64,
        found: u64,
    },

    #[error("header line {line} is not valid utf-8")]
    Decoding { line: usize },

    #[error("header has no end_header line")]
    MissingEndHeader,

    #[error("invalid max chunk size: {0}")]
    InvalidChunkSize(usize),

    #[error("chunk chain needs at least one chunk")]
    EmptyChunkList,
}
