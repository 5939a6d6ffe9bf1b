//! Code example panel content.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeExample {
    pub name: &'static str,
    pub key: &'static str,
}

pub const CODE_EXAMPLES: [CodeExample; 6] = [
    CodeExample {
        name: "Suggested Radius API",
        key: "suggested_radius_api",
    },
    CodeExample {
        name: "Features API (Predicted Attendance aggregation)",
        key: "features_api",
    },
    CodeExample {
        name: "Count of Events",
        key: "count_api",
    },
    CodeExample {
        name: "Demand Surge API",
        key: "demand_surge_api",
    },
    CodeExample {
        name: "Search Events",
        key: "events_api",
    },
    CodeExample {
        name: "Python SDK for PredictHQ APIs",
        key: "python_sdk",
    },
];

pub const SOURCE_CAPTION: &str =
    "Get the code for this app at https://github.com/example/hotel-demand-tui";

/// Read-only mapping from a content key to a pre-written markdown snippet.
pub trait DocStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// Snippets stored as `<root>/<key>.md`.
#[derive(Debug, Clone)]
pub struct DirDocStore {
    root: PathBuf,
}

impl DirDocStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocStore for DirDocStore {
    fn get(&self, key: &str) -> Option<String> {
        // Keys are fixed identifiers; anything path-like is refused.
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }

        let path = self.root.join(format!("{key}.md"));
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "code example not readable");
                None
            }
        }
    }
}

/// Body shown for an expanded example, with a placeholder when missing.
pub fn example_body(store: &dyn DocStore, example: &CodeExample) -> String {
    store.get(example.key).unwrap_or_else(|| {
        format!("No documentation available for `{}`.", example.key)
    })
}
