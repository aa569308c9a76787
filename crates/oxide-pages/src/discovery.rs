//! Page file discovery.
//!
//! Walks the pages directory and turns each page file into a route pattern:
//!
//! | file                  | pattern             |
//! |-----------------------|---------------------|
//! | `index.rs`            | `/`                 |
//! | `about.rs`            | `/about`            |
//! | `blog/index.rs`       | `/blog`             |
//! | `blog/[slug].rs`      | `/blog/[slug]`      |
//! | `users/[...parts].rs` | `/users/[...parts]` |

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::PagesConfig;
use crate::error::{Result, RouteError};

/// A page file found under the pages directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    /// Path relative to the pages directory.
    pub relative_path: PathBuf,
    /// Route pattern derived from the path.
    pub pattern: String,
}

impl PageFile {
    /// Creates a page file entry, deriving the pattern from the path.
    #[must_use]
    pub fn new(relative_path: impl Into<PathBuf>, config: &PagesConfig) -> Self {
        let relative_path = relative_path.into();
        let pattern = to_pattern(&relative_path, config);
        Self {
            relative_path,
            pattern,
        }
    }
}

/// Converts a page path, relative to the pages directory, to a route pattern.
///
/// The page extension is removed, components are joined with `/` and a
/// trailing index stem collapses into its parent directory.
///
/// # Example
///
/// ```
/// use oxide_pages::{to_pattern, PagesConfig};
///
/// let config = PagesConfig::default();
/// assert_eq!(to_pattern("blog/index.rs", &config), "/blog");
/// assert_eq!(to_pattern("index.rs", &config), "/");
/// assert_eq!(to_pattern("blog/[slug].rs", &config), "/blog/[slug]");
/// ```
#[must_use]
pub fn to_pattern(relative_path: impl AsRef<Path>, config: &PagesConfig) -> String {
    let mut parts: Vec<String> = relative_path
        .as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        let suffix = format!(".{}", config.extension);
        if let Some(stem) = last.strip_suffix(&suffix) {
            *last = stem.to_string();
        }
    }
    if parts.last() == Some(&config.index_name) {
        parts.pop();
    }

    format!("/{}", parts.join("/"))
}

/// Finds every page file under the configured pages directory.
///
/// Entries are returned in a stable order (sorted by file name at each
/// directory level). Entries that cannot be read, and pages whose path is
/// not valid UTF-8, are logged and skipped.
///
/// # Errors
///
/// Returns [`RouteError::PagesDirNotFound`] if the pages directory does not
/// exist, or [`RouteError::Walk`] if its root cannot be read.
pub fn discover(config: &PagesConfig) -> Result<Vec<PageFile>> {
    let root = &config.pages_dir;
    if !root.is_dir() {
        return Err(RouteError::PagesDirNotFound(root.clone()));
    }

    let mut pages = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry
            .path()
            .extension()
            .is_some_and(|ext| ext == config.extension.as_str())
        {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if relative.to_str().is_none() {
            warn!(file = %relative.display(), "Skipping page with a non-UTF-8 name");
            continue;
        }
        let page = PageFile::new(relative, config);
        debug!(file = %page.relative_path.display(), pattern = %page.pattern, "Discovered page");
        pages.push(page);
    }

    Ok(pages)
}
