use anyhow::Context;
use clap::Args;

use crate::io::payload::read_input;
use plystore_cli::gateway::Gateway;
use plystore_cli::store::DirBackend;

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Document name to store under
    #[arg(long)]
    pub name: String,

    /// Input .ply path (`-` for stdin)
    #[arg(long)]
    pub r#in: String,
}

pub fn run(args: PutArgs, gw: &Gateway<DirBackend>) -> anyhow::Result<()> {
    let bytes = read_input(&args.r#in)?;
    let rep = gw
        .submit(&args.name, &bytes)
        .with_context(|| format!("put {}", args.name))?;

    eprintln!(
        "put ok: name={} elements={} chunks={} bytes={} dropped={} id={}",
        rep.name, rep.elements, rep.chunks, rep.payload_bytes, rep.dropped_bytes, rep.document_id
    );
    Ok(())
}
