//! service-one: an HTTP service whose routes are autoloaded from `src/routes`.

pub mod app;
pub mod config;
pub mod middleware;
pub mod options;
pub mod routes;
pub mod store;
