use clap::Args;
use plystore_core::chunk::split;
use plystore_core::Document;

use crate::io::payload::read_input;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input .ply path (`-` for stdin)
    #[arg(long)]
    pub r#in: String,

    /// Also print the header text
    #[arg(long, default_value_t = false)]
    pub show_header: bool,
}

/// Dry run: parse and report element spans and chunking without storing anything.
pub fn run(args: ParseArgs, max_chunk_size: usize) -> anyhow::Result<()> {
    let bytes = read_input(&args.r#in)?;
    let doc = Document::parse(&bytes)?;

    eprintln!("--- parse ---");
    eprintln!("file           = {}", args.r#in);
    eprintln!("input_bytes    = {}", bytes.len());
    eprintln!("header_bytes   = {}", doc.header_text.len());
    eprintln!("body_offset    = {}", doc.body_offset());
    eprintln!("elements       = {}", doc.elements.len());
    for (body, (_, records)) in doc.elements.iter().zip(doc.element_records()) {
        let chunks = split(records, max_chunk_size)?.len();
        eprintln!(
            "element[{}]     = name={} count={} span={}..{} chunks={}",
            body.declaration.ordinal,
            body.declaration.name,
            body.declaration.count,
            body.span.start,
            body.span.end,
            chunks
        );
    }
    eprintln!("trailing_bytes = {}", bytes.len() - doc.body_end());

    if args.show_header {
        println!("{}", doc.header_text);
    }
    Ok(())
}
