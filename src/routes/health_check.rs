use crate::app_state::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use time::OffsetDateTime;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<Health> {
    Json(Health {
        status: "healthy",
        time: OffsetDateTime::now_utc().unix_timestamp(),
    })
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    time: i64,
}
