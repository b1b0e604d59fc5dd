use axum::routing::get;
use axum::Router;

use crate::handlers::suppliers;
use crate::state::AppState;

/// Supplier routes mounted at `/suppliers`.
///
/// ```text
/// GET    /        -> list_suppliers (summaries)
/// POST   /        -> create_supplier
/// GET    /{id}    -> get_supplier
/// PUT    /{id}    -> update_supplier
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(suppliers::list_suppliers).post(suppliers::create_supplier),
        )
        .route(
            "/{id}",
            get(suppliers::get_supplier).put(suppliers::update_supplier),
        )
}
