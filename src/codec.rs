//! JSON encoding at the crate boundary.
//!
//! Sections, schedules, schedule lists, priority maps, and filter
//! descriptors all share one JSON codec. Two layouts are produced:
//! - **minified**: no whitespace, for storage and transfer
//! - **expanded**: indented, for reading and diffing
//!
//! [`minify`] and [`expand`] rewrite an existing document between the
//! two layouts without changing its content or key order. Numbers are
//! carried as `i64`, `u64`, or `f64`: integers outside the 64-bit
//! ranges come back as their nearest float.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use thiserror::Error;

/// Default indent width for expanded output.
pub const DEFAULT_INDENT: usize = 2;

/// Errors raised while reading or writing JSON.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized output was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes to minified JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(value)?)
}

/// Serializes to expanded JSON with the default indent.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    to_json_indented(value, DEFAULT_INDENT)
}

/// Serializes to expanded JSON with `indent` spaces per level.
pub fn to_json_indented<T: Serialize + ?Sized>(
    value: &T,
    indent: usize,
) -> Result<String, CodecError> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Deserializes from JSON in either layout.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Rewrites a JSON document in minified layout.
pub fn minify(json: &str) -> Result<String, CodecError> {
    let value: Value = serde_json::from_str(json)?;
    to_json(&value)
}

/// Rewrites a JSON document in expanded layout.
pub fn expand(json: &str, indent: usize) -> Result<String, CodecError> {
    let value: Value = serde_json::from_str(json)?;
    to_json_indented(&value, indent)
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, CodecError> {
    let text = fs::read_to_string(path)?;
    from_json(&text)
}

/// Serializes and writes a JSON file, expanded or minified.
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    expanded: bool,
) -> Result<(), CodecError> {
    let text = if expanded {
        to_json_pretty(value)?
    } else {
        to_json(value)?
    };
    fs::write(path, text)?;
    Ok(())
}
