//! Compile-time route manifest.
//!
//! The manifest stands in for the routes directory: every entry is keyed by
//! the source path of a route module, relative to the crate root, so the
//! autoloader can derive prefixes and apply file-name filters exactly as it
//! would while walking a real directory.

use std::fmt;

use crate::error::{AutoloadError, AutoloadResult};
use crate::module::RouteModule;

/// Normalized `/`-separated source path of a route module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    /// Parse a relative path such as `src/routes/items/_id/show.rs`.
    ///
    /// Backslashes are accepted as separators.
    pub fn parse(raw: &str) -> AutoloadResult<Self> {
        let normalized = raw.trim().replace('\\', "/");
        if normalized.is_empty() {
            return Err(AutoloadError::invalid_module_path(raw, "path is empty"));
        }
        if normalized.starts_with('/') {
            return Err(AutoloadError::invalid_module_path(raw, "path must be relative"));
        }

        let mut segments = Vec::new();
        for segment in normalized.split('/') {
            match segment {
                "" => return Err(AutoloadError::invalid_module_path(raw, "empty path segment")),
                "." | ".." => {
                    return Err(AutoloadError::invalid_module_path(raw, "relative path segment"));
                }
                s => segments.push(s.to_string()),
            }
        }

        Ok(Self { segments })
    }

    /// Parse a directory path. Unlike module paths, `""` and trailing slashes are fine.
    pub(crate) fn parse_dir(raw: &str) -> AutoloadResult<Vec<String>> {
        let trimmed = raw.trim().replace('\\', "/");
        let trimmed = trimmed.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        Self::parse(trimmed).map(|path| path.segments)
    }

    pub fn file_name(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Directory segments leading to the file.
    pub fn dirs(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Split off `dir`, returning the directories between it and the file.
    pub fn relative_to(&self, dir: &[String]) -> Option<&[String]> {
        let dirs = self.dirs();
        dirs.strip_prefix(dir)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Ordered list of route modules keyed by source path.
pub struct RouteManifest<O> {
    entries: Vec<(String, RouteModule<O>)>,
}

impl<O> RouteManifest<O> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a module. Paths are validated when the manifest is loaded.
    pub fn module(mut self, path: impl Into<String>, module: RouteModule<O>) -> Self {
        self.entries.push((path.into(), module));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Parse every path, reject duplicates, and sort by path.
    pub(crate) fn resolve(self) -> AutoloadResult<Vec<(ModulePath, RouteModule<O>)>> {
        let mut resolved = self
            .entries
            .into_iter()
            .map(|(raw, module)| ModulePath::parse(&raw).map(|path| (path, module)))
            .collect::<AutoloadResult<Vec<_>>>()?;

        resolved.sort_by(|(a, _), (b, _)| a.cmp(b));
        if let Some(pair) = resolved.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(AutoloadError::DuplicateModule {
                path: pair[0].0.to_string(),
            });
        }

        Ok(resolved)
    }
}

impl<O> Default for RouteManifest<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for RouteManifest<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}

/// Build a [`RouteManifest`] from `path => module` pairs.
///
/// ```ignore
/// let manifest = route_manifest! {
///     "src/routes/root.rs" => root::module(),
///     "src/routes/items/list.rs" => items::list::module(),
/// };
/// ```
#[macro_export]
macro_rules! route_manifest {
    ($($path:expr => $module:expr),* $(,)?) => {
        $crate::RouteManifest::new()$(.module($path, $module))*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Routes;

    fn noop(_: &()) -> Routes {
        Routes::new()
    }

    #[test]
    fn parses_module_paths() {
        let path = ModulePath::parse("src/routes/items/_id/show.rs").unwrap();
        assert_eq!(path.file_name(), "show.rs");
        assert_eq!(path.dirs(), ["src", "routes", "items", "_id"]);
        assert_eq!(path.to_string(), "src/routes/items/_id/show.rs");

        let windows = ModulePath::parse("src\\routes\\root.rs").unwrap();
        assert_eq!(windows.to_string(), "src/routes/root.rs");
    }

    #[test]
    fn rejects_malformed_paths() {
        for raw in ["", "/abs/root.rs", "src//root.rs", "src/../root.rs", "src/routes/"] {
            let err = ModulePath::parse(raw).unwrap_err();
            assert!(
                matches!(err, AutoloadError::InvalidModulePath { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn relative_to_strips_the_directory() {
        let path = ModulePath::parse("src/routes/items/list.rs").unwrap();
        let dir = ModulePath::parse_dir("src/routes/").unwrap();
        assert_eq!(path.relative_to(&dir).unwrap(), ["items"]);

        let other = ModulePath::parse_dir("src/handlers").unwrap();
        assert!(path.relative_to(&other).is_none());

        // `src/route` must not match `src/routes` by string prefix
        let partial = ModulePath::parse_dir("src/route").unwrap();
        assert!(path.relative_to(&partial).is_none());
    }

    #[test]
    fn resolve_sorts_and_rejects_duplicates() {
        let manifest = route_manifest! {
            "src/routes/b.rs" => RouteModule::new(noop),
            "src/routes/a.rs" => RouteModule::new(noop),
        };
        let resolved = manifest.resolve().unwrap();
        let order: Vec<String> = resolved.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(order, ["src/routes/a.rs", "src/routes/b.rs"]);

        let dup = route_manifest! {
            "src/routes/a.rs" => RouteModule::new(noop),
            "src\\routes\\a.rs" => RouteModule::new(noop),
        };
        assert!(matches!(
            dup.resolve(),
            Err(AutoloadError::DuplicateModule { path }) if path == "src/routes/a.rs"
        ));
    }
}
