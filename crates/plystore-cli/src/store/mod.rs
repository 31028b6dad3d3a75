// crates/plystore-cli/src/store/mod.rs

pub mod dir;
pub mod format;

use std::collections::BTreeSet;

use plystore_core::{ChunkChain, PlyError};
use thiserror::Error;

pub use dir::DirBackend;

/// Longest accepted document name.
pub const MAX_NAME_LEN: usize = 250;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document '{0}' already exists")]
    DuplicateName(String),

    #[error("document '{0}' not found")]
    NotFound(String),

    #[error("invalid document name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("document '{name}' exceeds a record limit: {reason}")]
    TooLarge { name: String, reason: String },

    #[error("corrupt record for '{name}': {reason}")]
    Corrupt { name: String, reason: String },

    #[error("chunking failed: {0}")]
    Chunk(#[from] PlyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One element as persisted: its type name, record count and payload chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredElement {
    pub type_name: String,
    pub count: u64,
    pub max_chunk_size: usize,
    pub chain: ChunkChain,
}

impl StoredElement {
    pub fn new(type_name: &str, count: u64, payload: &[u8], max_chunk_size: usize) -> Result<Self, StorageError> {
        Ok(Self {
            type_name: type_name.to_owned(),
            count,
            max_chunk_size,
            chain: ChunkChain::from_payload(payload, max_chunk_size)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct StoredDocument {
    pub name: String,
    pub header_text: String,
    pub elements: Vec<StoredElement>,
}

impl StoredDocument {
    /// `header + "\n"`, then every element's records followed by `"\n"`.
    ///
    /// Elements declared with `count == 0` had no lines in the upload, so they render
    /// nothing; emitting a bare `"\n"` for them would add a line the source never had.
    pub fn render(&self) -> Vec<u8> {
        let body: usize = self.elements.iter().map(|e| e.chain.byte_len() + 1).sum();
        let mut out = Vec::with_capacity(self.header_text.len() + 1 + body);
        out.extend_from_slice(self.header_text.as_bytes());
        out.push(b'\n');
        for e in self.elements.iter().filter(|e| e.count > 0) {
            for c in &e.chain {
                out.extend_from_slice(c);
            }
            out.push(b'\n');
        }
        out
    }
}

pub trait StorageBackend {
    fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Fails with `DuplicateName` if `name` is already stored, even under concurrent writers.
    fn create(&self, name: &str, header_text: &str, elements: &[StoredElement]) -> Result<(), StorageError>;

    fn load(&self, name: &str) -> Result<StoredDocument, StorageError>;

    /// Stored document names, sorted.
    fn list(&self) -> Result<Vec<String>, StorageError>;

    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        Ok(self.load(name)?.render())
    }

    /// Every element type name used by any stored document, sorted and deduplicated.
    fn element_types(&self) -> Result<Vec<String>, StorageError> {
        let mut types = BTreeSet::new();
        for name in self.list()? {
            for e in self.load(&name)?.elements {
                types.insert(e.type_name);
            }
        }
        Ok(types.into_iter().collect())
    }
}

/// Reject documents whose fields do not fit the PLYR record widths.
pub fn check_limits(name: &str, header_text: &str, elements: &[StoredElement]) -> Result<(), StorageError> {
    let too_large = |reason: String| {
        Err(StorageError::TooLarge {
            name: name.to_owned(),
            reason,
        })
    };
    let u32_max = u32::MAX as usize;

    if header_text.len() > u32_max {
        return too_large(format!("header is {} bytes", header_text.len()));
    }
    if elements.len() > u32_max {
        return too_large(format!("{} elements declared", elements.len()));
    }

    // body: header_len + header + element_count, then per element fields and chunks
    let mut body = 4 + header_text.len() + 4;
    for e in elements {
        if e.type_name.len() > u16::MAX as usize {
            let shown: String = e.type_name.chars().take(16).collect();
            return too_large(format!(
                "element name '{shown}...' is {} bytes, max is {}",
                e.type_name.len(),
                u16::MAX
            ));
        }
        if e.max_chunk_size > u32_max || e.chain.chunk_count() > u32_max {
            return too_large(format!("element '{}' chunk layout does not fit u32", e.type_name));
        }
        body = body
            .saturating_add(2 + e.type_name.len() + 8 + 4 + 4)
            .saturating_add(e.chain.chunk_count().saturating_mul(4))
            .saturating_add(e.chain.byte_len());
    }
    if body > u32_max {
        return too_large(format!("record body would be {body} bytes"));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), StorageError> {
    let fail = |reason| {
        Err(StorageError::InvalidName {
            name: name.to_owned(),
            reason,
        })
    };
    if name.is_empty() {
        return fail("empty");
    }
    if name.len() > MAX_NAME_LEN {
        return fail("longer than 250 bytes");
    }
    if name.starts_with('.') {
        return fail("starts with '.'");
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
    {
        return fail("only [A-Za-z0-9._-] allowed");
    }
    Ok(())
}
