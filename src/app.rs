use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/insights", get(handlers::get_insights))
        .route("/api/deals", get(handlers::list_deals).post(handlers::create_deal))
        .route(
            "/api/deals/:id",
            get(handlers::get_deal)
                .patch(handlers::update_deal)
                .delete(handlers::delete_deal),
        )
        .route("/api/deals/:id/activities", get(handlers::deal_activities))
        .route("/api/activities", post(handlers::create_activity))
        .with_state(state)
}
