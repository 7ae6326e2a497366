use axum::routing::get;
use axum::Router;

mod healthz;
mod version;

pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(healthz::handler))
        .route("/version", get(version::handler))
}
