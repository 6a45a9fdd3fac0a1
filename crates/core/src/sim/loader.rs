//! Artifact Writer and Loader.
//!
//! This module moves programs between memory and disk. It performs:
//! 1. **Artifact writing:** A binary image plus its `.hex` listing, or a JSON dump when the
//!    target ends in `.json`.
//! 2. **Program loading:** Reads a binary image (or JSON dump) and decodes it. JSON dumps
//!    are checked against the image rules before they are returned.
//! 3. **Input loading:** Reads the text queued on input port 0.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::Error;
use crate::isa::encode::validate;
use crate::isa::{Program, decode, disassemble, encode};

/// Extension selecting the JSON artifact format.
pub const JSON_EXTENSION: &str = "json";

/// Suffix appended to the binary path for the listing.
pub const LISTING_SUFFIX: &str = ".hex";

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == JSON_EXTENSION)
}

/// Returns the listing path written next to a binary image.
pub fn listing_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(LISTING_SUFFIX);
    PathBuf::from(name)
}

/// Files produced by `write_artifacts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Paths written, the primary artifact first.
    pub paths: Vec<PathBuf>,
    /// The hex listing; written to disk only next to a binary image.
    pub listing: String,
}

/// Writes the artifacts for `program`.
///
/// A `.json` target receives a pretty-printed JSON dump. Any other target receives the binary
/// image, and `<target>.hex` receives the listing. Missing parent directories are created.
///
/// # Arguments
///
/// * `program` - The assembled program.
/// * `target` - Output path.
///
/// # Returns
///
/// The paths written and the listing, or the first I/O, JSON, or encoding error.
pub fn write_artifacts(program: &Program, target: impl AsRef<Path>) -> Result<Artifacts, Error> {
    let target = target.as_ref();
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let listing = disassemble(program)?;
    if is_json(target) {
        fs::write(target, serde_json::to_string_pretty(program)?)?;
        debug!(path = %target.display(), "wrote json program");
        return Ok(Artifacts {
            paths: vec![target.to_path_buf()],
            listing,
        });
    }

    let image = encode(program)?;
    let hex = listing_path(target);
    fs::write(target, &image)?;
    fs::write(&hex, &listing)?;
    debug!(path = %target.display(), bytes = image.len(), "wrote binary image");
    Ok(Artifacts {
        paths: vec![target.to_path_buf(), hex],
        listing,
    })
}

/// Reads a program artifact.
///
/// A `.json` path is parsed as a JSON dump; anything else is decoded as a binary image. A
/// JSON program whose arguments could not be encoded is rejected with `Error::Encode`.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, Error> {
    let path = path.as_ref();
    if is_json(path) {
        let text = fs::read_to_string(path)?;
        let program: Program = serde_json::from_str(&text)?;
        validate(&program)?;
        return Ok(program);
    }
    let bytes = fs::read(path)?;
    Ok(decode(&bytes)?)
}

/// Reads the input text for port 0.
pub fn load_input(path: impl AsRef<Path>) -> Result<String, Error> {
    Ok(fs::read_to_string(path)?)
}
