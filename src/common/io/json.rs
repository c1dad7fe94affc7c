use std::{fs::File, io::{BufReader, BufWriter, Read, Write}, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::DataLoadError;

/// Reads a JSON document from a file at `path`.
pub(crate) fn read_json_file(path: &Path) -> std::result::Result<Value, DataLoadError> {
    let file = File::open(path)
        .map_err(|source| DataLoadError::Io { path: path.to_path_buf(), source })?;
    read_json_reader(BufReader::new(file))
}

/// Reads a JSON document from any reader.
pub(crate) fn read_json_reader(reader: impl Read) -> std::result::Result<Value, DataLoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a JSON document from bytes (WASM-friendly).
pub(crate) fn read_json_bytes(bytes: &[u8]) -> std::result::Result<Value, DataLoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Pretty-print a JSON document with two-space indentation.
pub(crate) fn to_pretty_json_string(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// Writes a pretty-printed JSON document to a file at `path`.
pub(crate) fn write_pretty_json_file(path: &Path, value: &Value) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
