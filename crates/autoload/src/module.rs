//! Route modules: what a single file under the routes directory contributes.

use std::fmt;

use axum::routing::MethodRouter;

/// Routes declared by one module, relative to the module's prefix.
#[derive(Default)]
pub struct Routes {
    entries: Vec<(String, MethodRouter)>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a route. `path` is joined to the module prefix at load time.
    pub fn route(mut self, path: impl Into<String>, method_router: MethodRouter) -> Self {
        self.entries.push((path.into(), method_router));
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

    pub(crate) fn into_entries(self) -> Vec<(String, MethodRouter)> {
        self.entries
    }
}

impl fmt::Debug for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}

/// Registration function of a route module.
///
/// Receives the options value handed to the autoloader, unchanged.
pub type RegisterFn<O> = fn(&O) -> Routes;

/// A route module plus the metadata the autoloader honours.
pub struct RouteModule<O> {
    register: RegisterFn<O>,
    autoload: bool,
    auto_prefix: Option<String>,
    prefix_override: Option<String>,
}

impl<O> RouteModule<O> {
    pub fn new(register: RegisterFn<O>) -> Self {
        Self {
            register,
            autoload: true,
            auto_prefix: None,
            prefix_override: None,
        }
    }

    /// Keep the module in the manifest but never load it.
    pub fn disabled(mut self) -> Self {
        self.autoload = false;
        self
    }

    /// Extra prefix appended after the directory-derived one.
    pub fn auto_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.auto_prefix = Some(prefix.into());
        self
    }

    /// Prefix used instead of everything the autoloader would derive.
    pub fn prefix_override(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_override = Some(prefix.into());
        self
    }

    pub fn is_autoloaded(&self) -> bool {
        self.autoload
    }

    pub fn auto_prefix_value(&self) -> Option<&str> {
        self.auto_prefix.as_deref()
    }

    pub fn prefix_override_value(&self) -> Option<&str> {
        self.prefix_override.as_deref()
    }

    pub(crate) fn routes(&self, options: &O) -> Routes {
        (self.register)(options)
    }
}

impl<O> From<RegisterFn<O>> for RouteModule<O> {
    fn from(register: RegisterFn<O>) -> Self {
        Self::new(register)
    }
}

impl<O> fmt::Debug for RouteModule<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteModule")
            .field("autoload", &self.autoload)
            .field("auto_prefix", &self.auto_prefix)
            .field("prefix_override", &self.prefix_override)
            .finish_non_exhaustive()
    }
}
