use crate::workflow::runner::RunSummary;
use anyhow::Context;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Writes the run summary as pretty-printed JSON, creating parent folders.
pub fn write_report<P: AsRef<Path>>(path: P, summary: &RunSummary) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let file = File::create(path_ref)
        .with_context(|| format!("creating report {}", path_ref.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("writing report {}", path_ref.display()))?;
    Ok(())
}
