use anyhow::Context;
use clap::Args;

use crate::io::payload::write_output;
use plystore_cli::gateway::Gateway;
use plystore_cli::store::DirBackend;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document name
    #[arg(long)]
    pub name: String,

    /// Output path (stdout if omitted)
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run(args: GetArgs, gw: &Gateway<DirBackend>) -> anyhow::Result<()> {
    let bytes = gw
        .fetch(&args.name)
        .with_context(|| format!("get {}", args.name))?;
    write_output(args.out.as_deref(), &bytes)?;
    if let Some(out) = args.out.as_deref() {
        eprintln!("get ok: name={} out={} bytes={}", args.name, out, bytes.len());
    }
    Ok(())
}
