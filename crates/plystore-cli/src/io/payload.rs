// crates/plystore-cli/src/io/payload.rs

use std::io::{Read, Write};

use anyhow::Context;

/// Read a whole payload from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("read input: {path}"))
}

/// Write bytes to `path`, or to stdout when none is given.
pub fn write_output(path: Option<&str>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(p) => std::fs::write(p, bytes).with_context(|| format!("write output: {p}")),
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(bytes).context("write stdout")?;
            out.flush().context("flush stdout")
        }
    }
}
