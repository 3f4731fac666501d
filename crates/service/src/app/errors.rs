use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use serde_json::json;

use crate::store::ItemError;

pub fn item_error_to_response(err: ItemError) -> axum::response::Response {
    match err {
        ItemError::EmptyName | ItemError::NameTooLong => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        ItemError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub async fn not_found(uri: Uri) -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("no route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_errors_map_to_bad_request() {
        let res = item_error_to_response(ItemError::EmptyName);
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = item_error_to_response(ItemError::InvalidId("x".into()));
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
