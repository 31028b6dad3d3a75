// crates/plystore-cli/src/config.rs

use std::path::PathBuf;

use anyhow::Result;
use plystore_core::DEFAULT_MAX_CHUNK_SIZE;

pub const DEFAULT_ROOT: &str = "./plystore-data";
/// Chunk lengths are stored as u32 on disk; keep chunks well inside that.
pub const MAX_CHUNK_LIMIT: usize = 1 << 24;

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub max_chunk_size: usize,
    /// 0 disables compression of record bodies.
    pub zstd_level: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            zstd_level: 0,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.max_chunk_size >= 1, "max_chunk_size must be >= 1");
        anyhow::ensure!(
            self.max_chunk_size <= MAX_CHUNK_LIMIT,
            "max_chunk_size must be <= {MAX_CHUNK_LIMIT}"
        );
        anyhow::ensure!(
            (0..=22).contains(&self.zstd_level),
            "zstd_level must be in 0..=22"
        );
        Ok(())
    }
}
