//! The vector manifest: content hashes over every emitted file.

use {
    super::{VectorError, CATEGORIES},
    crate::{canonical, codec},
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
};

pub const MANIFEST_FILE: &str = "MANIFEST.json";

/// Digest of one vector file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDigest {
    pub sha256: String,
    pub size_bytes: u64,
}

/// `MANIFEST.json`: `category/filename → digest`, canonicalised on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_by: String,
    pub purpose: String,
    pub vectors: BTreeMap<String, BTreeMap<String, VectorDigest>>,
    pub version: String,
}

impl Manifest {
    /// Hash every `*.json` below the category directories of `dir`.
    pub fn scan(dir: &Path) -> Result<Self, VectorError> {
        let mut vectors = BTreeMap::new();

        for category in CATEGORIES {
            let mut files = BTreeMap::new();
            let category_dir = dir.join(category);
            if !category_dir.is_dir() {
                vectors.insert(category.to_string(), files);
                continue;
            }

            for entry in fs::read_dir(&category_dir)? {
                let entry = entry?;
                let filename = entry.file_name().to_string_lossy().into_owned();
                if !filename.ends_with(".json") {
                    continue;
                }
                let content = fs::read(entry.path())?;
                files.insert(
                    filename,
                    VectorDigest {
                        sha256: codec::sha256_hex(&content),
                        size_bytes: content.len() as u64,
                    },
                );
            }
            vectors.insert(category.to_string(), files);
        }

        Ok(Self {
            generated_by: "nocthub-verifier".to_string(),
            purpose: "Ground truth for independent verifier implementations".to_string(),
            vectors,
            version: "1.0".to_string(),
        })
    }

    /// Write the manifest in canonical form and return its path.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, VectorError> {
        let path = dir.join(MANIFEST_FILE);
        let value = serde_json::to_value(self)?;
        fs::write(&path, canonical::encode(&value))?;
        Ok(path)
    }

    pub fn load(dir: &Path) -> Result<Self, VectorError> {
        let bytes = fs::read(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Re-hash every listed file against the manifest.
    pub fn verify_files(&self, dir: &Path) -> Result<(), VectorError> {
        for (category, files) in &self.vectors {
            for (filename, digest) in files {
                let content = fs::read(dir.join(category).join(filename))?;
                if codec::sha256_hex(&content) != digest.sha256
                    || content.len() as u64 != digest.size_bytes
                {
                    return Err(VectorError::DigestMismatch {
                        category: category.clone(),
                        filename: filename.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn file_count(&self) -> usize {
        self.vectors.values().map(BTreeMap::len).sum()
    }
}
