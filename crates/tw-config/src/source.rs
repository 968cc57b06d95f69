//! Boards document source resolution.
//!
//! Resolution order: explicit path → environment variable → embedded
//! default document. An operator can re-point the registry at a new file at
//! runtime and trigger a rebuild.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::document;
use crate::error::ConfigResult;

/// Environment variable naming the boards document path.
pub const ENV_BOARDS_PATH: &str = "THRESHWATCH_BOARDS";

/// Compiled-in fallback document, used when no path is configured.
pub const DEFAULT_BOARDS_YAML: &str = include_str!("../boards/default.yaml");

/// Where the boards document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// An explicit filesystem path (CLI argument or operator command).
    Path(PathBuf),

    /// Path taken from the THRESHWATCH_BOARDS environment variable.
    Environment(PathBuf),

    /// The embedded default document.
    Builtin,
}

impl DocumentSource {
    /// Resolve the document source.
    ///
    /// An explicit path always wins; otherwise the environment variable is
    /// consulted; otherwise the embedded default is used.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return DocumentSource::Path(path.to_path_buf());
        }

        if let Ok(env_path) = std::env::var(ENV_BOARDS_PATH) {
            return DocumentSource::Environment(PathBuf::from(env_path));
        }

        DocumentSource::Builtin
    }

    /// Load and parse the document this source points at.
    pub fn load(&self) -> ConfigResult<Value> {
        match self {
            DocumentSource::Path(path) | DocumentSource::Environment(path) => {
                document::load_file(path)
            }
            DocumentSource::Builtin => document::parse_str(DEFAULT_BOARDS_YAML, "builtin default"),
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Environment(path) => {
                write!(f, "{} (from {})", path.display(), ENV_BOARDS_PATH)
            }
            DocumentSource::Builtin => write!(f, "builtin default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::build_registry;

    #[test]
    fn test_explicit_path_wins() {
        let source = DocumentSource::resolve(Some(Path::new("/tmp/boards.yaml")));
        assert_eq!(
            source,
            DocumentSource::Path(PathBuf::from("/tmp/boards.yaml"))
        );
    }

    #[test]
    fn test_builtin_document_builds() {
        let doc = DocumentSource::Builtin.load().unwrap();
        let registry = build_registry(&doc).unwrap();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_display_names_source() {
        assert_eq!(DocumentSource::Builtin.to_string(), "builtin default");
        assert_eq!(
            DocumentSource::Path(PathBuf::from("/a/b.yaml")).to_string(),
            "/a/b.yaml"
        );
    }
}
