mod admin;
mod products;

use axum::Router;
use elif_docket::RequestHandler;

pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/admin", admin::router())
}

/// Route table handed to the documentation dockets
pub fn handlers() -> Vec<RequestHandler> {
    products::handlers()
        .into_iter()
        .chain(admin::handlers())
        .collect()
}
