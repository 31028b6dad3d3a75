use clap::Args;
use plystore_cli::gateway::Gateway;
use plystore_cli::store::{DirBackend, StorageBackend};
use plystore_core::checksum::document_id_hex;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Document name
    #[arg(long)]
    pub name: String,
}

pub fn run(args: InspectArgs, gw: &Gateway<DirBackend>) -> anyhow::Result<()> {
    let doc = gw.backend().load(&args.name)?;
    let rendered = doc.render();

    eprintln!("--- inspect ---");
    eprintln!("name           = {}", doc.name);
    eprintln!("document_id    = {}", document_id_hex(&rendered));
    eprintln!("rendered_bytes = {}", rendered.len());
    eprintln!("header_lines   = {}", doc.header_text.lines().count());
    for (i, e) in doc.elements.iter().enumerate() {
        eprintln!(
            "element[{}]     = type={} count={} bytes={} chunks={} max_chunk={}",
            i,
            e.type_name,
            e.count,
            e.chain.byte_len(),
            e.chain.chunk_count(),
            e.max_chunk_size
        );
    }
    Ok(())
}
