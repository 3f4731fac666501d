use axum::{http::StatusCode, routing::get, Json};
use serde_json::json;

use service_one_autoload::{RouteModule, Routes};

use crate::options::ServiceOptions;

pub fn module() -> RouteModule<ServiceOptions> {
    RouteModule::new(routes)
}

fn routes(opts: &ServiceOptions) -> Routes {
    // Captured once at registration; the handler never touches shared state.
    let service = opts.service_name.clone();
    Routes::new().route(
        "/health",
        get(move || {
            let service = service.clone();
            async move { (StatusCode::OK, Json(json!({ "status": "ok", "service": service }))) }
        }),
    )
}
