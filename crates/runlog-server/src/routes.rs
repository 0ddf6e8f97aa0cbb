//! HTTP route definitions

use crate::handlers::{self, statistics};
use crate::middleware::{self, CorsHeaders};
use crate::AppState;
use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Collection paths; both serve the same records
pub const STATISTIC_PATHS: &[&str] = &["/running-statistics", "/api/records"];

pub fn create_router(state: AppState, cors: CorsHeaders) -> Router {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .merge(statistic_routes())
        // Layers: CORS is outermost so preflights never reach the router
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(cors, middleware::cors))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

fn statistic_routes() -> Router<AppState> {
    STATISTIC_PATHS.iter().fold(Router::new(), |router, base| {
        router
            .route(base, get(statistics::list).post(statistics::create))
            .route(
                &format!("{}/:id", base),
                get(statistics::get).delete(statistics::delete),
            )
    })
}
