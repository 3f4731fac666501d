use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json};
use chrono::Utc;
use serde_json::json;

use service_one_autoload::{RouteModule, Routes};

use crate::options::ServiceOptions;

pub fn module() -> RouteModule<ServiceOptions> {
    RouteModule::new(routes)
}

fn routes(_opts: &ServiceOptions) -> Routes {
    Routes::new().route("/", get(service_info))
}

pub async fn service_info(
    Extension(opts): Extension<Arc<ServiceOptions>>,
) -> Json<serde_json::Value> {
    let uptime = Utc::now().signed_duration_since(opts.started_at);
    Json(json!({
        "service": opts.service_name,
        "version": opts.version,
        "started_at": opts.started_at.to_rfc3339(),
        "uptime_seconds": uptime.num_seconds().max(0),
    }))
}
