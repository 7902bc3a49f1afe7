use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

pub const STDIN_MARKER: &str = "-";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{origin} is not valid JSON: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    #[error("{0} is empty")]
    Empty(String),
}

pub fn is_stdin(source: &Path) -> bool {
    source.as_os_str() == STDIN_MARKER
}

pub fn origin_name(source: &Path) -> String {
    if is_stdin(source) {
        "<stdin>".to_string()
    } else {
        source.display().to_string()
    }
}

pub fn read_payload_text(source: &Path) -> Result<String, InputError> {
    let io_err = |e| InputError::Io {
        path: source.to_path_buf(),
        source: e,
    };

    if is_stdin(source) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(io_err)?;
        Ok(text)
    } else {
        std::fs::read_to_string(source).map_err(io_err)
    }
}

pub fn parse_payload(text: &str, origin: &str) -> Result<Value, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty(origin.to_string()));
    }
    serde_json::from_str(text).map_err(|e| InputError::Parse {
        origin: origin.to_string(),
        source: e,
    })
}

pub fn load_payload(source: &Path) -> Result<Value, InputError> {
    let text = read_payload_text(source)?;
    let payload = parse_payload(&text, &origin_name(source))?;
    tracing::debug!(source = %origin_name(source), bytes = text.len(), "payload loaded");
    Ok(payload)
}

#[cfg(test)]
#[path = "../tests/src_inline/input.rs"]
mod tests;
