//! In-memory view of a packaged model.
//!
//! An [`Archive`] reads every model document of a zip package into memory,
//! keyed by the entry's base name (`simulink/systems/system_7.xml` becomes
//! `system_7.xml`). Nothing is extracted to disk.

use std::{
    fs::File,
    io::{self, Read, Seek},
    path::Path,
};

use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

use blockforest_parser::DocumentSource;

/// Errors raised while loading a model package.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to read model package: {0}")]
    Io(#[from] io::Error),

    #[error("invalid model package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("document `{name}` is not valid UTF-8")]
    Encoding { name: String },

    #[error("model package has no root document `{name}`")]
    MissingRoot { name: String },
}

/// Model documents of a zip package, keyed by base name.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    documents: IndexMap<String, String>,
}

impl Archive {
    /// Open a package from a file path.
    ///
    /// Only entries whose name ends with `suffix` are loaded as documents.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if the file cannot be read, is not a zip
    /// archive, or contains a document that is not UTF-8.
    pub fn open(path: impl AsRef<Path>, suffix: &str) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        info!(path:? = path; "Opening model package");
        let file = File::open(path)?;
        Self::from_reader(file, suffix)
    }

    /// Read a package from any seekable reader.
    ///
    /// When two entries share a base name, the first one in archive order is
    /// kept.
    pub fn from_reader<R: Read + Seek>(reader: R, suffix: &str) -> Result<Self, ArchiveError> {
        let mut zip = zip::ZipArchive::new(reader)?;
        let mut documents = IndexMap::new();

        for idx in 0..zip.len() {
            let mut entry = zip.by_index(idx)?;
            if entry.is_dir() {
                continue;
            }

            let path = entry.name().to_string();
            let name = base_name(&path);
            if name.is_empty() || !name.ends_with(suffix) {
                debug!(entry = path.as_str(); "Skipping non-document entry");
                continue;
            }
            if documents.contains_key(name) {
                warn!(entry = path.as_str(), name; "Duplicate document name, keeping the first");
                continue;
            }

            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            let text = String::from_utf8(bytes).map_err(|_| ArchiveError::Encoding {
                name: path.clone(),
            })?;

            debug!(entry = path.as_str(), bytes = text.len(); "Loaded document");
            documents.insert(name.to_string(), text);
        }

        info!(documents = documents.len(); "Model package loaded");
        Ok(Self { documents })
    }

    /// Returns `true` if a document with this name was loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    /// Document names in archive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for Archive {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for Archive {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
