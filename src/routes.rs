use std::path::Path;

use axum::{response::IntoResponse, Router};
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePathLayer, services::{ServeDir, ServeFile}, trace::TraceLayer};

use crate::{categories, response::not_found_response, state::AppState, transactions};

///
/// Every JSON resource, meant to be nested under `/api`
///
pub fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/categories", categories::routes::routes(app_state.clone()))
        .nest("/transactions", transactions::routes::routes(app_state.clone()))
        .nest("/summary", transactions::routes::summary_routes(app_state))
        .fallback(api_not_found)
}

///
/// The full application: the API under `/api`, and the frontend bundle in
/// `static_dir` for everything else. Unknown frontend paths get `index.html`
/// so client-side routing keeps working. A trailing slash is trimmed
/// before routing, so `/api/transactions/` reaches `/api/transactions`.
///
pub fn app(app_state: AppState, static_dir: &Path) -> Router {
    let index = ServeFile::new(static_dir.join("index.html"));

    let routed = Router::new()
        .nest("/api", api_routes(app_state))
        .fallback_service(ServeDir::new(static_dir).fallback(index));

    // Path normalization has to run before the inner router matches
    Router::new()
        .fallback_service(NormalizePathLayer::trim_trailing_slash().layer(routed))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn api_not_found() -> impl IntoResponse {
    not_found_response("Route not found")
}
