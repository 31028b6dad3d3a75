// crates/plystore-cli/src/io/mod.rs

pub mod payload;
