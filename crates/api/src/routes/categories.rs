use axum::routing::{get, post};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET    /          -> list_categories
/// POST   /          -> create_category
/// GET    /export    -> export_categories
/// POST   /import    -> import_categories
/// GET    /{id}      -> get_category
/// PUT    /{id}      -> update_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/export", get(categories::export_categories))
        .route("/import", post(categories::import_categories))
        .route(
            "/{id}",
            get(categories::get_category).put(categories::update_category),
        )
}
