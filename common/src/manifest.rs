use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer};
use tracing::debug;

/// Name of the manifest every pipeline writes next to its output.
pub const MANIFEST: &str = "meta.json";

/// Pretty prints `value` as JSON with a four space indent.
pub fn to_writer<W: Write, T: Serialize>(writer: W, value: &T) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(writer, formatter);
    value.serialize(&mut ser)?;
    Ok(())
}

/// Writes `value` to `dir/meta.json`, replacing any existing manifest.
pub fn write_manifest<T: Serialize>(dir: &Path, value: &T) -> Result<()> {
    let path = dir.join(MANIFEST);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create `{}`", path.display()))?;

    let mut writer = BufWriter::new(file);
    to_writer(&mut writer, value)?;
    writer.flush()?;

    debug!("Wrote manifest `{}`", path.display());
    Ok(())
}
