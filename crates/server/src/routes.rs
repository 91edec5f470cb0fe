use axum::{
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use configs::ServerConfig;

use crate::middleware;
use crate::state::AppState;

pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

/// Build the full application router: `/health` plus the `/api` user routes,
/// wrapped in the shared middleware stack.
pub fn build_router(state: AppState, cfg: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .with_state(state);
    middleware::apply(router, cfg)
}
