use axum::{
    routing::{get, post},
    Router,
};

use crate::controller::{health::health, interaction::post_interaction};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/discord/interactions", post(post_interaction))
}
