//! The autoload plugin: registers every eligible module of a manifest subtree.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Extension;
use regex::Regex;

use crate::app::{App, Plugin};
use crate::error::{AutoloadError, AutoloadResult};
use crate::manifest::{ModulePath, RouteManifest};
use crate::module::RouteModule;
use crate::prefix::{dir_prefix, join_path};

pub const DEFAULT_INDEX_PATTERN: &str = r"(?i)^index\.rs$";
pub const DEFAULT_SCRIPT_PATTERN: &str = r"\.rs$";

/// Why a manifest entry was not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MaxDepth,
    Ignored,
    NotAScript,
    ShadowedByIndex,
    Disabled,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaxDepth => "max_depth",
            Self::Ignored => "ignore_pattern",
            Self::NotAScript => "script_pattern",
            Self::ShadowedByIndex => "index_pattern",
            Self::Disabled => "autoload_disabled",
        }
    }
}

/// Autoloading plugin over a [`RouteManifest`].
///
/// Every module under `dir` is loaded unless a filter excludes it; its
/// prefix comes from the directories between `dir` and the file. The same
/// options value is handed to every module and also exposed to handlers as
/// `Extension<Arc<O>>`.
pub struct Autoload<O> {
    manifest: RouteManifest<O>,
    options: Arc<O>,
    dir: String,
    route_params: bool,
    ignore_pattern: Option<String>,
    index_pattern: String,
    script_pattern: String,
    dir_name_route_prefix: bool,
    max_depth: Option<usize>,
    prefix: Option<String>,
}

impl<O> Autoload<O>
where
    O: Send + Sync + 'static,
{
    pub fn new(manifest: RouteManifest<O>, options: impl Into<Arc<O>>) -> Self {
        Self {
            manifest,
            options: options.into(),
            dir: String::new(),
            route_params: false,
            ignore_pattern: None,
            index_pattern: DEFAULT_INDEX_PATTERN.to_string(),
            script_pattern: DEFAULT_SCRIPT_PATTERN.to_string(),
            dir_name_route_prefix: true,
            max_depth: None,
            prefix: None,
        }
    }

    /// Manifest subtree to load, e.g. `src/routes`.
    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Turn `_name` directories into `:name` path parameters.
    pub fn route_params(mut self, enabled: bool) -> Self {
        self.route_params = enabled;
        self
    }

    /// Skip entries whose file or directory name matches this regex.
    pub fn ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_pattern = Some(pattern.into());
        self
    }

    pub fn index_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.index_pattern = pattern.into();
        self
    }

    pub fn script_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.script_pattern = pattern.into();
        self
    }

    pub fn dir_name_route_prefix(mut self, enabled: bool) -> Self {
        self.dir_name_route_prefix = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Prefix prepended to every module prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn options(&self) -> &Arc<O> {
        &self.options
    }

    fn load(mut self, app: &mut App) -> AutoloadResult<()> {
        let filters = Filters::compile(
            self.ignore_pattern.as_deref(),
            &self.index_pattern,
            &self.script_pattern,
        )?;
        let dir = ModulePath::parse_dir(&self.dir)?;
        let entries = std::mem::take(&mut self.manifest).resolve()?;

        let selected: Vec<(ModulePath, Vec<String>, RouteModule<O>)> = entries
            .into_iter()
            .filter_map(|(path, module)| {
                let rel = path.relative_to(&dir)?.to_vec();
                Some((path, rel, module))
            })
            .collect();

        if selected.is_empty() {
            return Err(AutoloadError::directory_not_found(self.dir));
        }

        // Directories (relative to `dir`) holding an index module.
        let index_dirs: BTreeSet<Vec<String>> = selected
            .iter()
            .filter(|(path, rel, _)| {
                filters.is_index(path.file_name()) && filters.visible(path.file_name(), rel)
            })
            .map(|(_, rel, _)| rel.clone())
            .collect();

        let mut batch = Vec::new();
        let mut loaded = 0usize;
        let mut skipped = 0usize;

        for (path, rel, module) in selected {
            let file_name = path.file_name();
            let skip = if self.max_depth.is_some_and(|max| rel.len() > max) {
                Some(SkipReason::MaxDepth)
            } else if !filters.visible(file_name, &rel) {
                Some(SkipReason::Ignored)
            } else if !filters.is_script(file_name) {
                Some(SkipReason::NotAScript)
            } else if index_dirs.contains(&rel) && !filters.is_index(file_name) {
                Some(SkipReason::ShadowedByIndex)
            } else if !module.is_autoloaded() {
                Some(SkipReason::Disabled)
            } else {
                None
            };

            if let Some(reason) = skip {
                tracing::debug!(module = %path, reason = reason.as_str(), "skipping route module");
                skipped += 1;
                continue;
            }

            let prefix = self.module_prefix(&rel, &module);
            let routes = module.routes(&self.options);
            tracing::debug!(
                module = %path,
                prefix = %prefix,
                routes = routes.len(),
                "loading route module"
            );

            let module_name = path.to_string();
            for (route_path, method_router) in routes.into_entries() {
                batch.push((join_path(&prefix, &route_path), method_router, module_name.clone()));
            }
            loaded += 1;
        }

        let registered = batch.len();
        let options = Arc::clone(&self.options);
        app.merge_scoped(batch, move |router| router.layer(Extension(options)))?;

        tracing::info!(
            dir = %self.dir,
            modules_loaded = loaded,
            modules_skipped = skipped,
            routes_registered = registered,
            "route modules autoloaded"
        );
        Ok(())
    }

    fn module_prefix(&self, rel: &[String], module: &RouteModule<O>) -> String {
        if let Some(overridden) = module.prefix_override_value() {
            return overridden.to_string();
        }

        let mut prefix = self.prefix.clone().unwrap_or_default();
        if self.dir_name_route_prefix {
            prefix.push_str(&dir_prefix(rel.iter().map(String::as_str), self.route_params));
        }
        if let Some(auto) = module.auto_prefix_value() {
            prefix = join_path(&prefix, auto);
        }
        prefix
    }
}

impl<O> Plugin for Autoload<O>
where
    O: Send + Sync + 'static,
{
    type Error = AutoloadError;

    fn name(&self) -> &str {
        "autoload"
    }

    fn register(self, app: &mut App) -> Result<(), Self::Error> {
        self.load(app)
    }
}

struct Filters {
    ignore: Option<Regex>,
    index: Regex,
    script: Regex,
}

impl Filters {
    fn compile(ignore: Option<&str>, index: &str, script: &str) -> AutoloadResult<Self> {
        let compile = |option: &'static str, pattern: &str| {
            Regex::new(pattern).map_err(|source| AutoloadError::InvalidPattern { option, source })
        };

        Ok(Self {
            ignore: ignore.map(|p| compile("ignore_pattern", p)).transpose()?,
            index: compile("index_pattern", index)?,
            script: compile("script_pattern", script)?,
        })
    }

    /// Neither the file nor any directory on the way to it is ignored.
    fn visible(&self, file_name: &str, rel: &[String]) -> bool {
        match &self.ignore {
            None => true,
            Some(re) => !re.is_match(file_name) && !rel.iter().any(|d| re.is_match(d)),
        }
    }

    fn is_index(&self, file_name: &str) -> bool {
        self.index.is_match(file_name)
    }

    fn is_script(&self, file_name: &str) -> bool {
        self.script.is_match(file_name)
    }
}
