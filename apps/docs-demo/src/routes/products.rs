use axum::{extract::Path, http::StatusCode, response::Json, routing::get, Router};
use elif_docket::RequestHandler;
use serde_json::Value;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

pub fn handlers() -> Vec<RequestHandler> {
    vec![
        RequestHandler::new("GET", "/products", module_path!())
            .with_summary("List products")
            .with_operation_id("listProducts")
            .with_tag("Products"),
        RequestHandler::new("GET", "/products/{id}", module_path!())
            .with_summary("Get product by ID")
            .with_operation_id("getProduct")
            .with_tag("Products"),
    ]
}

async fn list_products() -> Json<Value> {
    Json(serde_json::json!({"items": [], "next": null}))
}

async fn get_product(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    Ok(Json(serde_json::json!({"id": id})))
}
