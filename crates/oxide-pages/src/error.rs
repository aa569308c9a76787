//! Error types for page routing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering pages and building the route tree.
///
/// Failing to match a request path is not an error: the matcher returns
/// `None` for that.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The pattern is not a well-formed route pattern.
    #[error("malformed route pattern '{pattern}': {reason}")]
    MalformedPattern {
        /// The offending pattern.
        pattern: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two routes normalize to the same pattern.
    #[error("duplicate route '{pattern}'")]
    DuplicateRoute {
        /// The pattern registered twice.
        pattern: String,
    },

    /// Two page files map to the same pattern.
    #[error("pages '{}' and '{}' both map to '{pattern}'", .first.display(), .second.display())]
    DuplicatePage {
        /// The shared pattern.
        pattern: String,
        /// The page registered first.
        first: PathBuf,
        /// The page that was rejected.
        second: PathBuf,
    },

    /// Two patterns bind different parameter names at the same position.
    #[error(
        "route '{pattern}' binds '{requested}' at '{position}', \
         which is already bound as '{existing}'"
    )]
    ConstructionConflict {
        /// The pattern being inserted.
        pattern: String,
        /// Pattern prefix up to and including the conflicting segment.
        position: String,
        /// Parameter name already recorded in the tree.
        existing: String,
        /// Parameter name the new pattern asks for.
        requested: String,
    },

    /// The pages directory does not exist.
    #[error("pages directory not found: {0}")]
    PagesDirNotFound(PathBuf),

    /// Directory traversal failed.
    #[error("failed to walk pages directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error (reading config files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An error tied to a specific page file.
    #[error("{}: {source}", .path.display())]
    Page {
        /// Page file path, relative to the pages directory.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<RouteError>,
    },

    /// Multiple errors occurred.
    #[error("Multiple errors occurred:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<RouteError>),
}

impl RouteError {
    /// Creates a malformed pattern error.
    #[must_use]
    pub fn malformed(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Wraps this error with the page file that caused it.
    #[must_use]
    pub fn in_page(self, path: impl Into<PathBuf>) -> Self {
        Self::Page {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Folds collected errors into a single result.
    ///
    /// No errors means success, one error is returned as is, more than one
    /// becomes [`RouteError::Multiple`].
    ///
    /// # Errors
    ///
    /// Returns the collected error(s) when `errors` is non-empty.
    pub fn collect(mut errors: Vec<Self>) -> Result<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::Multiple(errors)),
        }
    }

    /// Returns the individual errors, flattening [`RouteError::Multiple`].
    #[must_use]
    pub fn into_vec(self) -> Vec<Self> {
        match self {
            Self::Multiple(errors) => errors.into_iter().flat_map(Self::into_vec).collect(),
            other => vec![other],
        }
    }
}

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;
