use axum::routing::get;
use axum::Router;

use crate::handlers::category_lines;
use crate::state::AppState;

/// Category line routes mounted at `/category-lines`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category_lines::list_category_lines).post(category_lines::create_category_line),
        )
        .route(
            "/{id}",
            get(category_lines::get_category_line).put(category_lines::update_category_line),
        )
}
