use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use elif_docket::RequestHandler;
use serde_json::Value;

pub fn router() -> Router {
    Router::new()
        .route("/products/:id", delete(delete_product))
        .route("/stats", get(stats))
        .route("/internal/cache", delete(flush_cache))
}

pub fn handlers() -> Vec<RequestHandler> {
    vec![
        RequestHandler::new("DELETE", "/admin/products/{id}", module_path!())
            .with_summary("Delete a product")
            .with_tag("Admin"),
        RequestHandler::new("GET", "/admin/stats", module_path!())
            .with_summary("Shop statistics")
            .with_tag("Admin"),
        RequestHandler::new("DELETE", "/admin/internal/cache", module_path!())
            .with_summary("Flush caches")
            .with_tag("Admin")
            .deprecated(),
    ]
}

async fn delete_product(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn stats() -> Json<Value> {
    Json(serde_json::json!({"products": 0, "orders": 0}))
}

async fn flush_cache() -> StatusCode {
    StatusCode::NO_CONTENT
}
