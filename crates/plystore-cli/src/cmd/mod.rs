// crates/plystore-cli/src/cmd/mod.rs

pub mod get;
pub mod inspect;
pub mod list;
pub mod parse;
pub mod put;
