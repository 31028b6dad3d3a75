use plystore_cli::gateway::Gateway;
use plystore_cli::store::{DirBackend, StorageBackend};

/// One stored document name per line on stdout.
pub fn run_names(gw: &Gateway<DirBackend>) -> anyhow::Result<()> {
    for name in gw.list()? {
        println!("{name}");
    }
    Ok(())
}

/// One element type name per line on stdout.
pub fn run_types(gw: &Gateway<DirBackend>) -> anyhow::Result<()> {
    for t in gw.backend().element_types()? {
        println!("{t}");
    }
    Ok(())
}
