//! HTTP application wiring (autoloaded routes + middleware).
//!
//! - `bootstrap`: the startup hook that registers the route autoloader
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;

use service_one_autoload::{App, Autoload, AutoloadResult};

use crate::middleware;
use crate::options::ServiceOptions;
use crate::routes;

pub mod errors;

/// Directory holding the route modules, relative to this crate's root.
pub const ROUTES_DIR: &str = "src/routes";

/// Files whose name matches this are test helpers, never routes.
pub const TEST_FILE_PATTERN: &str = r".*test\.rs";

/// Register every route module under [`ROUTES_DIR`] into `app`.
///
/// `opts` is forwarded as-is to each module; failures are not handled here.
pub fn bootstrap(app: &mut App, opts: Arc<ServiceOptions>) -> AutoloadResult<()> {
    let prefix = opts.route_prefix.clone();

    let mut autoload = Autoload::new(routes::manifest(), opts)
        .dir(ROUTES_DIR)
        .route_params(true)
        .ignore_pattern(TEST_FILE_PATTERN);
    if let Some(prefix) = prefix {
        autoload = autoload.prefix(prefix);
    }

    app.register(autoload)?;
    Ok(())
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(opts: Arc<ServiceOptions>) -> AutoloadResult<Router> {
    let mut app = App::new();
    bootstrap(&mut app, opts)?;

    for route in app.routes() {
        tracing::debug!(path = %route.path, module = %route.module, "route registered");
    }

    Ok(app
        .into_router()
        .fallback(errors::not_found)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_registers_every_route_module() {
        service_one_observability::tracing::init_for_tests();

        let mut app = App::new();
        bootstrap(&mut app, Arc::new(ServiceOptions::new("test"))).unwrap();

        let paths: Vec<&str> = app.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/health", "/items/:id", "/items", "/"]);
    }

    #[test]
    fn route_prefix_applies_to_every_route() {
        let mut app = App::new();
        let opts = ServiceOptions::new("test").with_route_prefix("/api");
        bootstrap(&mut app, Arc::new(opts)).unwrap();

        assert!(app.routes().iter().all(|r| r.path.starts_with("/api")));
        assert!(app.has_route("/api/items/:id"));
    }

    #[test]
    fn test_file_pattern_matches_test_modules_only() {
        let re = regex::Regex::new(TEST_FILE_PATTERN).unwrap();
        assert!(re.is_match("items_test.rs"));
        assert!(!re.is_match("show.rs"));
        assert!(!re.is_match("testing.rs"));
        // unanchored: any name ending in `test.rs` is excluded
        assert!(re.is_match("latest.rs"));
    }
}
