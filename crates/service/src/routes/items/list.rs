use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json,
};
use serde::Deserialize;

use service_one_autoload::{RouteModule, Routes};

use crate::app::errors;
use crate::options::ServiceOptions;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

pub fn module() -> RouteModule<ServiceOptions> {
    RouteModule::new(routes)
}

fn routes(_opts: &ServiceOptions) -> Routes {
    Routes::new().route("/", get(list_items).post(create_item))
}

pub async fn list_items(
    Extension(opts): Extension<Arc<ServiceOptions>>,
) -> axum::response::Response {
    let items = opts.items.list().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "count": items.len(), "items": items })),
    )
        .into_response()
}

pub async fn create_item(
    Extension(opts): Extension<Arc<ServiceOptions>>,
    Json(body): Json<CreateItemRequest>,
) -> axum::response::Response {
    match opts.items.create(&body.name).await {
        Ok(item) => {
            tracing::info!(item_id = %item.id, "item created");
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(e) => errors::item_error_to_response(e),
    }
}
