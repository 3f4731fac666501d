//! Autoload error model.

use thiserror::Error;

/// Result type used across the autoloader.
pub type AutoloadResult<T> = Result<T, AutoloadError>;

/// Errors raised while registering route modules into an [`App`](crate::App).
///
/// None of these are recovered inside the crate: they surface from
/// [`App::register`](crate::App::register) to whoever drives startup.
#[derive(Debug, Error)]
pub enum AutoloadError {
    /// The manifest holds no route module under the requested directory.
    #[error("routes directory not found: {dir}")]
    DirectoryNotFound { dir: String },

    /// One of the filter patterns failed to compile.
    #[error("invalid {option}: {source}")]
    InvalidPattern {
        option: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A manifest entry has a path that cannot name a source file.
    #[error("invalid module path {path:?}: {reason}")]
    InvalidModulePath { path: String, reason: &'static str },

    /// Two manifest entries share the same path.
    #[error("duplicate route module: {path}")]
    DuplicateModule { path: String },

    /// A route path is not something the router can accept.
    #[error("invalid route path {path:?} declared by {module}")]
    InvalidRoutePath { path: String, module: String },

    /// A registered route already matches the same requests.
    #[error("route {path} declared by {module} conflicts with {existing} declared by {existing_module}")]
    DuplicateRoute {
        path: String,
        module: String,
        existing: String,
        existing_module: String,
    },
}

impl AutoloadError {
    pub fn directory_not_found(dir: impl Into<String>) -> Self {
        Self::DirectoryNotFound { dir: dir.into() }
    }

    pub fn invalid_module_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidModulePath {
            path: path.into(),
            reason,
        }
    }

    pub fn invalid_route_path(path: impl Into<String>, module: impl Into<String>) -> Self {
        Self::InvalidRoutePath {
            path: path.into(),
            module: module.into(),
        }
    }
}
