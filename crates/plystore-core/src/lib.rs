pub mod error;
pub mod tokenizer;

pub mod header;
pub mod body;
pub mod document;
pub mod chunk;
pub mod checksum;

pub use crate::chunk::{ChunkChain, DEFAULT_MAX_CHUNK_SIZE};
pub use crate::document::Document;
pub use crate::error::{PlyError, Result};
pub use crate::header::ElementDeclaration;
