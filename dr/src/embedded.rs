//! Embedded documentation
//!
//! The bundled content store under `docs/` is compiled into the binary, so
//! `dr` keeps working wherever it is installed.

use std::path::Path;

use tracing::debug;

/// Every bundled document, keyed by its path relative to `docs/`
pub const BUNDLED: &[(&str, &str)] = &[
    ("cli/topics.md", include_str!("../docs/cli/topics.md")),
    ("express/middleware.adv.md", include_str!("../docs/express/middleware.adv.md")),
    ("express/middleware.md", include_str!("../docs/express/middleware.md")),
    ("getting-started.md", include_str!("../docs/getting-started.md")),
];

/// Get a bundled document by its relative path
pub fn get_embedded(path: &Path) -> Option<&'static str> {
    let name = path.to_str()?;
    debug!(%name, "get_embedded: called");
    BUNDLED
        .iter()
        .find(|(relative, _)| *relative == name)
        .map(|(_, content)| *content)
}
