//! Host framework instance and the plugin contract.

use axum::Router;
use axum::routing::MethodRouter;

use crate::error::{AutoloadError, AutoloadResult};
use crate::prefix::{is_valid_route_path, routes_conflict};

/// A route registered into an [`App`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: String,
    pub module: String,
}

/// Something that configures an [`App`] once during startup.
pub trait Plugin {
    type Error;

    fn name(&self) -> &str;

    fn register(self, app: &mut App) -> Result<(), Self::Error>;
}

/// Framework instance: an axum router plus the list of routes it holds.
#[derive(Default)]
pub struct App {
    router: Router,
    routes: Vec<RouteRecord>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a plugin against this instance. Errors are returned as-is.
    pub fn register<P: Plugin>(&mut self, plugin: P) -> Result<&mut Self, P::Error> {
        let name = plugin.name().to_string();
        let before = self.routes.len();
        tracing::debug!(plugin = %name, "registering plugin");

        plugin.register(self)?;

        tracing::debug!(
            plugin = %name,
            routes_added = self.routes.len() - before,
            "plugin registered"
        );
        Ok(self)
    }

    /// Register a single route on the app router.
    pub fn route(
        &mut self,
        path: &str,
        method_router: MethodRouter,
        module: &str,
    ) -> AutoloadResult<&mut Self> {
        self.record(path, module)?;
        self.router = std::mem::take(&mut self.router).route(path, method_router);
        Ok(self)
    }

    /// Register a batch of routes as one scoped router and merge it.
    ///
    /// `layer` wraps only the routes of this batch, which is how a plugin
    /// attaches its own extensions without touching the rest of the app.
    pub fn merge_scoped<F>(
        &mut self,
        routes: Vec<(String, MethodRouter, String)>,
        layer: F,
    ) -> AutoloadResult<&mut Self>
    where
        F: FnOnce(Router) -> Router,
    {
        if routes.is_empty() {
            return Ok(self);
        }

        // Validate the whole batch before touching the router.
        let mark = self.routes.len();
        for (path, _, module) in &routes {
            if let Err(e) = self.record(path, module) {
                self.rollback(mark);
                return Err(e);
            }
        }

        let scoped = routes
            .into_iter()
            .fold(Router::new(), |router, (path, method_router, _)| {
                router.route(&path, method_router)
            });
        self.router = std::mem::take(&mut self.router).merge(layer(scoped));
        Ok(self)
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn has_route(&self, path: &str) -> bool {
        self.routes.iter().any(|r| r.path == path)
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    fn record(&mut self, path: &str, module: &str) -> AutoloadResult<()> {
        if !is_valid_route_path(path) {
            return Err(AutoloadError::invalid_route_path(path, module));
        }

        if let Some(existing) = self.routes.iter().find(|r| routes_conflict(&r.path, path)) {
            return Err(AutoloadError::DuplicateRoute {
                path: path.to_string(),
                module: module.to_string(),
                existing: existing.path.clone(),
                existing_module: existing.module.clone(),
            });
        }

        self.routes.push(RouteRecord {
            path: path.to_string(),
            module: module.to_string(),
        });
        Ok(())
    }

    fn rollback(&mut self, mark: usize) {
        self.routes.truncate(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    struct Health;

    impl Plugin for Health {
        type Error = AutoloadError;

        fn name(&self) -> &str {
            "health"
        }

        fn register(self, app: &mut App) -> Result<(), Self::Error> {
            app.route("/health", get(|| async { "ok" }), "health")?;
            Ok(())
        }
    }

    struct Failing;

    impl Plugin for Failing {
        type Error = String;

        fn name(&self) -> &str {
            "failing"
        }

        fn register(self, _app: &mut App) -> Result<(), Self::Error> {
            Err("boom".to_string())
        }
    }

    #[test]
    fn register_runs_plugin() {
        let mut app = App::new();
        app.register(Health).unwrap();
        assert_eq!(app.len(), 1);
        assert!(app.has_route("/health"));
        assert_eq!(app.routes()[0].module, "health");
    }

    #[test]
    fn plugin_errors_propagate_unchanged() {
        let mut app = App::new();
        let err = app.register(Failing).err().unwrap();
        assert_eq!(err, "boom");
        assert!(app.is_empty());
    }

    #[test]
    fn param_names_do_not_disambiguate() {
        let mut app = App::new();
        app.route("/items/:id", get(|| async { "a" }), "a.rs").unwrap();

        let err = app
            .route("/items/:item_id", get(|| async { "b" }), "b.rs")
            .err()
            .unwrap();
        match err {
            AutoloadError::DuplicateRoute {
                existing_module, ..
            } => assert_eq!(existing_module, "a.rs"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(app.len(), 1);
    }

    #[test]
    fn catch_all_overlapping_a_param_is_a_conflict() {
        let mut app = App::new();
        app.route("/items/:id", get(|| async { "a" }), "a.rs").unwrap();

        let batch = vec![(
            "/items/*rest".to_string(),
            get(|| async { "b" }),
            "b.rs".to_string(),
        )];
        let err = app.merge_scoped(batch, |r| r).err().unwrap();
        match err {
            AutoloadError::DuplicateRoute {
                path, existing, ..
            } => {
                assert_eq!(path, "/items/*rest");
                assert_eq!(existing, "/items/:id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(app.len(), 1);
        assert!(!app.has_route("/items/*rest"));
    }

    #[test]
    fn distinct_param_routes_coexist() {
        let mut app = App::new();
        app.route("/items/:id", get(|| async { "a" }), "a.rs").unwrap();
        app.route("/items/:item_id/tags", get(|| async { "b" }), "b.rs")
            .unwrap();
        app.route("/files", get(|| async { "c" }), "c.rs").unwrap();
        app.route("/files/*rest", get(|| async { "d" }), "d.rs").unwrap();
        assert_eq!(app.len(), 4);
    }

    #[test]
    fn invalid_paths_are_rejected() {
        let mut app = App::new();
        let err = app.route("items", get(|| async { "x" }), "x.rs").err().unwrap();
        assert!(matches!(err, AutoloadError::InvalidRoutePath { .. }));
    }

    #[test]
    fn catch_all_must_be_last() {
        let mut app = App::new();
        let err = app
            .route("/a/*rest/b", get(|| async { "x" }), "x.rs")
            .err()
            .unwrap();
        match err {
            AutoloadError::InvalidRoutePath { path, module } => {
                assert_eq!(path, "/a/*rest/b");
                assert_eq!(module, "x.rs");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(app.is_empty());
    }

    #[test]
    fn failed_batch_leaves_no_records() {
        let mut app = App::new();
        app.route("/a", get(|| async { "a" }), "a.rs").unwrap();

        let batch = vec![
            ("/b".to_string(), get(|| async { "b" }), "b.rs".to_string()),
            ("/a".to_string(), get(|| async { "a2" }), "c.rs".to_string()),
        ];
        assert!(app.merge_scoped(batch, |r| r).is_err());
        assert_eq!(app.len(), 1);
        assert!(!app.has_route("/b"));

        // the rolled back path can be claimed again
        let batch = vec![("/b".to_string(), get(|| async { "b" }), "b.rs".to_string())];
        app.merge_scoped(batch, |r| r).unwrap();
        assert!(app.has_route("/b"));
    }
}
