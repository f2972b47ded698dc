//! Golden-vector generation and manifest-driven verification.
//!
//! Conforming implementations meet at these files: each vector is
//! canonicalised before writing, so hashing a file and re-canonicalising it
//! produce identical bytes. `MANIFEST.json` maps every vector file to its
//! SHA-256 and size and is the root of test-vector integrity.

mod generate;
pub mod manifest;
pub mod runner;

pub use {
    manifest::{Manifest, VectorDigest, MANIFEST_FILE},
    runner::{run, RunFailure, RunReport},
};

use {
    crate::{bls::BlsError, codec::CodecError},
    serde_json::Value,
    std::{fs, path::Path},
    thiserror::Error,
};

/// Vector categories, in the order producers emit them.
pub const CATEGORIES: [&str; 3] = ["canonical", "bls", "integration"];

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Bls(#[from] BlsError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("invalid vector json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest digest mismatch for {category}/{filename}")]
    DigestMismatch { category: String, filename: String },
    #[error("unknown vector category '{0}'")]
    UnknownCategory(String),
    #[error("vector field '{0}' is missing or mistyped")]
    Field(&'static str),
}

/// Generate every vector category under `out_dir` and write the manifest.
pub fn generate(out_dir: &Path) -> Result<Manifest, VectorError> {
    generate::canonical_vectors(out_dir)?;
    generate::bls_vectors(out_dir)?;
    generate::integration_vectors(out_dir)?;

    let manifest = Manifest::scan(out_dir)?;
    manifest.write(out_dir)?;
    log::debug!(
        "wrote {} golden vectors under {}",
        manifest.file_count(),
        out_dir.display()
    );

    Ok(manifest)
}

/// Write one vector file in canonical form.
fn write_vector(out_dir: &Path, category: &str, name: &str, vector: &Value) -> Result<(), VectorError> {
    let dir = out_dir.join(category);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(format!("{name}.json")), crate::canonical::encode(vector))?;
    Ok(())
}

#[cfg(test)]
mod tests;
