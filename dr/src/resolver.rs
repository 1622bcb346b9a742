//! Topic resolution against the content store
//!
//! Resolution is a pure function of a [`Topic`] and the documents in a
//! [`ContentStore`]. Candidates are checked in [`CANDIDATE_SUFFIXES`] order,
//! so the basic document always wins unless the caller asked for `.adv`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::DocError;
use crate::store::ContentStore;
use crate::topic::{ADVANCED_MARKER, Topic};

/// Which flavor of document a path holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Basic,
    Advanced,
}

/// Candidate suffixes in precedence order
pub const CANDIDATE_SUFFIXES: [(DocKind, &str); 2] = [(DocKind::Basic, ".md"), (DocKind::Advanced, ".adv.md")];

/// A path that may hold the document for a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: DocKind,
    pub path: PathBuf,
}

/// Outcome of looking up a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The basic document; `has_advanced` notes whether a companion exists
    Found { path: PathBuf, has_advanced: bool },
    /// The advanced document, either requested explicitly or the only one present
    FoundAdvanced { path: PathBuf },
    NotFound,
}

impl Resolution {
    /// Path of the document to display, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found { path, .. } | Self::FoundAdvanced { path } => Some(path),
            Self::NotFound => None,
        }
    }

    pub fn kind(&self) -> Option<DocKind> {
        match self {
            Self::Found { .. } => Some(DocKind::Basic),
            Self::FoundAdvanced { .. } => Some(DocKind::Advanced),
            Self::NotFound => None,
        }
    }

    /// True only for a basic document that has an advanced companion
    pub fn has_advanced(&self) -> bool {
        matches!(self, Self::Found { has_advanced: true, .. })
    }
}

/// Build the candidate paths for a topic, in precedence order.
///
/// A topic that already ends in `.adv` maps its `.md` candidate to the
/// advanced kind, since the caller opted in.
pub fn candidates(topic: &Topic, store: &dyn ContentStore) -> [Candidate; 2] {
    CANDIDATE_SUFFIXES.map(|(kind, suffix)| {
        let kind = if topic.is_advanced() { DocKind::Advanced } else { kind };
        Candidate {
            kind,
            path: store.document_path(&format!("{}{}", topic.as_str(), suffix)),
        }
    })
}

/// Resolve a topic to the document that should be displayed.
///
/// Missing documents give `Resolution::NotFound`. A candidate that exists
/// but cannot be inspected is an `Io` fault.
pub fn resolve(topic: &Topic, store: &dyn ContentStore) -> Result<Resolution, DocError> {
    debug!(%topic, "resolve: called");
    let [primary, companion] = candidates(topic, store);

    let resolution = if store.is_document(&primary.path)? {
        match primary.kind {
            DocKind::Basic => {
                let has_advanced = store.is_document(&companion.path)?;
                debug!(has_advanced, "resolve: basic document found");
                Resolution::Found {
                    path: primary.path,
                    has_advanced,
                }
            }
            DocKind::Advanced => {
                debug!("resolve: explicitly requested advanced document found");
                Resolution::FoundAdvanced { path: primary.path }
            }
        }
    } else if store.is_document(&companion.path)? {
        debug!("resolve: only the advanced document exists");
        Resolution::FoundAdvanced { path: companion.path }
    } else {
        debug!("resolve: no candidate exists");
        Resolution::NotFound
    };

    info!(%topic, kind = ?resolution.kind(), "Resolved topic");
    Ok(resolution)
}

/// Read a resolved document's raw bytes
pub fn read_document(store: &dyn ContentStore, path: &Path) -> Result<Vec<u8>, DocError> {
    store.read(path)
}

/// List every topic in the store, sorted
pub fn list_topics(store: &dyn ContentStore) -> Result<Vec<String>, DocError> {
    let topics = store.topics()?;
    debug!(count = topics.len(), "list_topics: done");
    Ok(topics)
}

/// True when the topic names an advanced document
pub fn is_advanced_topic(topic: &str) -> bool {
    topic.ends_with(ADVANCED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BundledStore, FsStore};
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn store(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("contents of {file}")).unwrap();
        }
        temp
    }

    fn topic(raw: &str) -> Topic {
        Topic::parse(raw).unwrap().unwrap()
    }

    fn lookup(raw: &str, root: &Path) -> Resolution {
        resolve(&topic(raw), &FsStore::new(root)).unwrap()
    }

    #[test]
    fn test_candidates_order() {
        let found = candidates(&topic("express/middleware"), &FsStore::new("/docs"));
        assert_eq!(
            found,
            [
                Candidate {
                    kind: DocKind::Basic,
                    path: PathBuf::from("/docs/express/middleware.md"),
                },
                Candidate {
                    kind: DocKind::Advanced,
                    path: PathBuf::from("/docs/express/middleware.adv.md"),
                },
            ]
        );
    }

    #[test]
    fn test_candidates_for_advanced_topic() {
        let found = candidates(&topic("express/middleware.adv"), &FsStore::new("/docs"));
        assert!(found.iter().all(|c| c.kind == DocKind::Advanced));
        assert_eq!(found[0].path, PathBuf::from("/docs/express/middleware.adv.md"));
        assert_eq!(found[1].path, PathBuf::from("/docs/express/middleware.adv.adv.md"));
    }

    #[test]
    fn test_resolve_basic_only() {
        let temp = store(&["express/middleware.md"]);
        assert_eq!(
            lookup("express/middleware", temp.path()),
            Resolution::Found {
                path: temp.path().join("express/middleware.md"),
                has_advanced: false,
            }
        );
    }

    #[test]
    fn test_resolve_basic_with_advanced_companion() {
        let temp = store(&["express/middleware.md", "express/middleware.adv.md"]);
        let resolution = lookup("express/middleware", temp.path());
        assert_eq!(resolution.kind(), Some(DocKind::Basic));
        assert!(resolution.has_advanced());
        assert_eq!(resolution.path(), Some(temp.path().join("express/middleware.md").as_path()));
    }

    #[test]
    fn test_resolve_explicit_advanced() {
        let temp = store(&["express/middleware.md", "express/middleware.adv.md"]);
        let resolution = lookup("express/middleware.adv", temp.path());
        assert_eq!(
            resolution,
            Resolution::FoundAdvanced {
                path: temp.path().join("express/middleware.adv.md"),
            }
        );
        assert!(!resolution.has_advanced());
    }

    #[test]
    fn test_resolve_explicit_advanced_double_suffix() {
        let temp = store(&["express/middleware.md", "express/middleware.adv.adv.md"]);
        assert_eq!(
            lookup("express/middleware.adv", temp.path()),
            Resolution::FoundAdvanced {
                path: temp.path().join("express/middleware.adv.adv.md"),
            }
        );
    }

    #[test]
    fn test_resolve_advanced_only() {
        let temp = store(&["express/middleware.adv.md"]);
        assert_eq!(
            lookup("express/middleware", temp.path()),
            Resolution::FoundAdvanced {
                path: temp.path().join("express/middleware.adv.md"),
            }
        );
    }

    #[test]
    fn test_resolve_not_found() {
        let temp = store(&["express/middleware.md"]);
        assert_eq!(lookup("foo", temp.path()), Resolution::NotFound);
        assert_eq!(lookup("foo", temp.path()).path(), None);
    }

    #[test]
    fn test_resolve_ignores_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("guide.md")).unwrap();
        assert_eq!(lookup("guide", temp.path()), Resolution::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlink_loop_is_io_fault() {
        let temp = TempDir::new().unwrap();
        let looped = temp.path().join("loop.md");
        std::os::unix::fs::symlink(&looped, &looped).unwrap();

        let err = resolve(&topic("loop"), &FsStore::new(temp.path())).unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
        assert_eq!(err.exit_code(), 3);

        // listing the same tree agrees that the entry is a fault
        assert!(matches!(list_topics(&FsStore::new(temp.path())), Err(DocError::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_companion_fault_is_not_hidden() {
        let temp = store(&["intro.md"]);
        let looped = temp.path().join("intro.adv.md");
        std::os::unix::fs::symlink(&looped, &looped).unwrap();

        let result = resolve(&topic("intro"), &FsStore::new(temp.path()));
        assert!(matches!(result, Err(DocError::Io { .. })));
    }

    #[test]
    fn test_resolve_bundled() {
        let resolution = resolve(&topic("express/middleware"), &BundledStore).unwrap();
        assert_eq!(
            resolution,
            Resolution::Found {
                path: PathBuf::from("express/middleware.md"),
                has_advanced: true,
            }
        );
    }

    #[test]
    fn test_read_document() {
        let temp = store(&["intro.md"]);
        let content = read_document(&FsStore::new(temp.path()), &temp.path().join("intro.md")).unwrap();
        assert_eq!(content, b"contents of intro.md");
    }

    #[test]
    fn test_read_document_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_document(&FsStore::new(temp.path()), &temp.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
    }

    #[test]
    fn test_list_topics() {
        let temp = store(&["intro.md", "express/middleware.md", "express/middleware.adv.md"]);
        let topics = list_topics(&FsStore::new(temp.path())).unwrap();
        assert_eq!(topics, vec!["express/middleware", "express/middleware.adv", "intro"]);
        assert!(is_advanced_topic(&topics[1]));
        assert!(!is_advanced_topic(&topics[0]));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_basic_wins_over_advanced(name in "[a-z]{1,10}", basic in any::<bool>(), advanced in any::<bool>()) {
            let mut files = Vec::new();
            let basic_file = format!("{name}.md");
            let advanced_file = format!("{name}.adv.md");
            if basic {
                files.push(basic_file.as_str());
            }
            if advanced {
                files.push(advanced_file.as_str());
            }
            let temp = store(&files);

            let resolution = lookup(&name, temp.path());
            match (basic, advanced) {
                (true, _) => {
                    let expected = Resolution::Found { path: temp.path().join(&basic_file), has_advanced: advanced };
                    prop_assert_eq!(resolution, expected);
                }
                (false, true) => {
                    let expected = Resolution::FoundAdvanced { path: temp.path().join(&advanced_file) };
                    prop_assert_eq!(resolution, expected);
                }
                (false, false) => prop_assert_eq!(resolution, Resolution::NotFound),
            }
        }
    }
}
