//! `service-one-autoload`: route autoloading over a compile-time manifest.
//!
//! Route modules are listed once, keyed by their source path, and the
//! [`Autoload`] plugin registers them into an [`App`]. Prefixes come from
//! the directories a module lives in, `_name` directories can become path
//! parameters, and file-name patterns decide what is skipped.

pub mod app;
pub mod autoload;
pub mod error;
pub mod manifest;
pub mod module;
pub mod prefix;

pub use app::{App, Plugin, RouteRecord};
pub use autoload::{Autoload, SkipReason};
pub use error::{AutoloadError, AutoloadResult};
pub use manifest::{ModulePath, RouteManifest};
pub use module::{RegisterFn, RouteModule, Routes};
