use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json,
};

use service_one_autoload::{RouteModule, Routes};

use crate::app::errors;
use crate::options::ServiceOptions;
use crate::store::ItemId;

pub fn module() -> RouteModule<ServiceOptions> {
    RouteModule::new(routes)
}

// Mounted under `/items/:id`; the `id` parameter comes from the `_id` directory.
fn routes(_opts: &ServiceOptions) -> Routes {
    Routes::new().route("/", get(get_item).delete(delete_item))
}

pub async fn get_item(
    Extension(opts): Extension<Arc<ServiceOptions>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::item_error_to_response(e),
    };

    match opts.items.get(&id).await {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
    }
}

pub async fn delete_item(
    Extension(opts): Extension<Arc<ServiceOptions>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::item_error_to_response(e),
    };

    match opts.items.remove(&id).await {
        Some(_) => {
            tracing::info!(item_id = %id, "item deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
    }
}
