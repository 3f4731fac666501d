//! Route modules, one file per area.
//!
//! Nothing here registers routes directly: [`manifest`] lists each module
//! under its source path and `app::bootstrap` hands the manifest to the
//! autoloader, which turns directories into prefixes (`items/_id` becomes
//! `/items/:id`).

use service_one_autoload::{RouteManifest, route_manifest};

use crate::options::ServiceOptions;

pub mod health;
pub mod items;
pub mod root;

/// Every route module of the service, keyed by its path under the crate root.
pub fn manifest() -> RouteManifest<ServiceOptions> {
    route_manifest! {
        "src/routes/root.rs" => root::module(),
        "src/routes/health.rs" => health::module(),
        "src/routes/items/list.rs" => items::list::module(),
        "src/routes/items/_id/show.rs" => items::_id::show::module(),
    }
}
