use crate::{
    app_state::AppState,
    domain::{NewsletterSubscriber, SubscriptionRequest},
    extract::JsonBody,
};
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use time::OffsetDateTime;

pub fn router() -> Router<AppState> {
    Router::new().route("/newsletter", post(subscribe))
}

#[tracing::instrument(
    name = "Adding a newsletter subscriber",
    skip(app_state, request),
    fields(subscriber_email = %request.email)
)]
async fn subscribe(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<SubscriptionRequest>,
) -> Json<SubscribeResponse> {
    let subscriber = NewsletterSubscriber::from_request(request, OffsetDateTime::now_utc());

    sync_subscriber(&app_state, &subscriber).await;

    Json(SubscribeResponse {
        message: "Successfully subscribed!",
    })
}

/// Best-effort relay of a subscriber to the LinkedIn newsletter.
pub(super) async fn sync_subscriber(app_state: &AppState, subscriber: &NewsletterSubscriber) {
    match app_state.linkedin_client.add_subscriber(subscriber).await {
        Ok(()) => tracing::info!("Subscriber synced with LinkedIn newsletter"),
        Err(e) => e.log("LinkedIn"),
    }
}

#[derive(Serialize)]
struct SubscribeResponse {
    message: &'static str,
}
