use axum::routing::{get, post};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes mounted at `/products`.
///
/// ```text
/// GET    /                      -> list_products (priced)
/// POST   /                      -> create_product
/// GET    /export                -> export_products
/// POST   /import                -> import_products
/// POST   /import-by-supplier    -> import_products_by_supplier
/// GET    /{id}                  -> get_product (priced)
/// PUT    /{id}                  -> update_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route("/export", get(products::export_products))
        .route("/import", post(products::import_products))
        .route(
            "/import-by-supplier",
            post(products::import_products_by_supplier),
        )
        .route(
            "/{id}",
            get(products::get_product).put(products::update_product),
        )
}
