// crates/plystore-cli/src/gateway.rs
//
// Request handling between a transport (here the CLI) and storage: validate the name,
// parse, chunk each element and persist. Parse failures never reach storage.

use plystore_core::checksum::document_id_hex;
use plystore_core::{Document, PlyError};
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{validate_name, StorageBackend, StorageError, StoredDocument, StoredElement};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("wrong ply file format: {0}")]
    Parse(#[from] PlyError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectKind {
    BadRequest,
    NotFound,
    Internal,
}

impl GatewayError {
    pub fn kind(&self) -> RejectKind {
        match self {
            GatewayError::Parse(_) => RejectKind::BadRequest,
            GatewayError::Storage(StorageError::NotFound(_)) => RejectKind::NotFound,
            GatewayError::Storage(
                StorageError::DuplicateName(_)
                | StorageError::InvalidName { .. }
                | StorageError::TooLarge { .. }
                | StorageError::Chunk(_),
            ) => RejectKind::BadRequest,
            GatewayError::Storage(StorageError::Corrupt { .. } | StorageError::Io(_)) => RejectKind::Internal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitReport {
    pub name: String,
    pub elements: usize,
    pub chunks: usize,
    pub payload_bytes: usize,
    /// Bytes after the last declared element; not stored.
    pub dropped_bytes: usize,
    pub document_id: String,
}

pub struct Gateway<B> {
    backend: B,
    max_chunk_size: usize,
}

impl<B: StorageBackend> Gateway<B> {
    pub fn new(backend: B, max_chunk_size: usize) -> Self {
        Self {
            backend,
            max_chunk_size,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn submit(&self, name: &str, payload: &[u8]) -> Result<SubmitReport, GatewayError> {
        validate_name(name)?;
        if self.backend.exists(name)? {
            warn!(name, "rejecting duplicate name");
            return Err(StorageError::DuplicateName(name.to_owned()).into());
        }

        let doc = Document::parse(payload).map_err(|e| {
            warn!(name, error = %e, "rejecting unparsable payload");
            e
        })?;

        let mut elements = Vec::with_capacity(doc.elements.len());
        for (decl, records) in doc.element_records() {
            elements.push(StoredElement::new(&decl.name, decl.count, records, self.max_chunk_size)?);
        }
        let stored = StoredDocument {
            name: name.to_owned(),
            header_text: doc.header_text.clone(),
            elements,
        };

        // racing writers are settled by create()
        self.backend.create(name, &stored.header_text, &stored.elements)?;

        let report = SubmitReport {
            name: name.to_owned(),
            elements: stored.elements.len(),
            chunks: stored.elements.iter().map(|e| e.chain.chunk_count()).sum(),
            payload_bytes: payload.len(),
            dropped_bytes: payload.len() - doc.body_end(),
            document_id: document_id_hex(&stored.render()),
        };
        info!(name, id = %report.document_id, chunks = report.chunks, "document accepted");
        Ok(report)
    }

    pub fn fetch(&self, name: &str) -> Result<Vec<u8>, GatewayError> {
        Ok(self.backend.read(name)?)
    }

    pub fn list(&self) -> Result<Vec<String>, GatewayError> {
        Ok(self.backend.list()?)
    }
}
