pub mod addresses;
pub mod categories;
pub mod category_lines;
pub mod health;
pub mod products;
pub mod suppliers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /addresses                         list, create
/// /addresses/{id}                    get, update
///
/// /categories                        list, create
/// /categories/{id}                   get, update
/// /categories/export                 CSV download
/// /categories/import                 CSV upload (insert only)
///
/// /category-lines                    list, create
/// /category-lines/{id}               get, update
///
/// /suppliers                         list (summaries), create
/// /suppliers/{id}                    get, update
///
/// /products                          list (priced), create
/// /products/{id}                     get (priced), update
/// /products/export                   CSV download
/// /products/import                   CSV upload (insert only)
/// /products/import-by-supplier       CSV upload (insert or update by sku)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/addresses", addresses::router())
        .nest("/categories", categories::router())
        .nest("/category-lines", category_lines::router())
        .nest("/suppliers", suppliers::router())
        .nest("/products", products::router())
}
