use axum::routing::get;
use axum::Router;

use crate::handlers::addresses;
use crate::state::AppState;

/// Address routes mounted at `/addresses`.
///
/// ```text
/// GET    /        -> list_addresses
/// POST   /        -> create_address
/// GET    /{id}    -> get_address
/// PUT    /{id}    -> update_address
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(addresses::list_addresses).post(addresses::create_address),
        )
        .route(
            "/{id}",
            get(addresses::get_address).put(addresses::update_address),
        )
}
