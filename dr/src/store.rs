//! Content stores the resolver reads from
//!
//! [`FsStore`] reads a Markdown tree on disk. [`BundledStore`] serves the
//! documents compiled into the binary.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::embedded::{self, BUNDLED};
use crate::error::DocError;
use crate::topic::DOC_EXTENSION;

/// A read-only tree of documents addressed by relative path
pub trait ContentStore {
    /// Full path of a document given its path relative to the store root
    fn document_path(&self, relative: &str) -> PathBuf;

    /// Whether a regular document exists at `path`.
    ///
    /// Absence is `Ok(false)`. Anything else that prevents the check is an
    /// `Io` fault.
    fn is_document(&self, path: &Path) -> Result<bool, DocError>;

    /// Read a document's raw bytes
    fn read(&self, path: &Path) -> Result<Vec<u8>, DocError>;

    /// Every topic in the store, sorted
    fn topics(&self) -> Result<Vec<String>, DocError>;
}

/// Content store backed by a directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for FsStore {
    fn document_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn is_document(&self, path: &Path) -> Result<bool, DocError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(false),
            Err(source) => {
                debug!(?path, %source, "FsStore::is_document: metadata failed");
                Err(DocError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, DocError> {
        debug!(?path, "FsStore::read: called");
        fs::read(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn topics(&self) -> Result<Vec<String>, DocError> {
        debug!(root = ?self.root, "FsStore::topics: called");
        let mut topics = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                DocError::Io {
                    path,
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected")),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if let Some(topic) = topic_from_relative(&relative) {
                topics.push(topic);
            }
        }

        topics.sort();
        topics.dedup();
        Ok(topics)
    }
}

/// Content store compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledStore;

impl ContentStore for BundledStore {
    fn document_path(&self, relative: &str) -> PathBuf {
        PathBuf::from(relative)
    }

    fn is_document(&self, path: &Path) -> Result<bool, DocError> {
        Ok(embedded::get_embedded(path).is_some())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, DocError> {
        embedded::get_embedded(path)
            .map(|content| content.as_bytes().to_vec())
            .ok_or_else(|| DocError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::NotFound, "not a bundled document"),
            })
    }

    fn topics(&self) -> Result<Vec<String>, DocError> {
        let mut topics: Vec<String> = BUNDLED
            .iter()
            .filter_map(|(relative, _)| topic_from_relative(relative))
            .collect();
        topics.sort();
        Ok(topics)
    }
}

fn topic_from_relative(relative: &str) -> Option<String> {
    relative
        .strip_suffix(DOC_EXTENSION)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
