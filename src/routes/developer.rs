use crate::{
    app_state::AppState,
    domain::{Developer, DeveloperSubmission},
    extract::JsonBody,
    routes::newsletter::sync_subscriber,
};
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use time::OffsetDateTime;

pub fn router() -> Router<AppState> {
    Router::new().route("/developer/submit", post(submit_developer))
}

/// Relays the submission to Airtable and the LinkedIn newsletter. Neither relay can fail
/// the request once the body has been decoded.
#[tracing::instrument(
    name = "Submitting a developer",
    skip(app_state, submission),
    fields(developer_email = %submission.email, how_found = %submission.how_found)
)]
async fn submit_developer(
    State(app_state): State<AppState>,
    JsonBody(submission): JsonBody<DeveloperSubmission>,
) -> Json<SubmitResponse> {
    let developer = Developer::from_submission(submission, OffsetDateTime::now_utc());
    tracing::info!(developer_id = developer.id, "Received developer submission");

    match app_state.airtable_client.add_record(&developer).await {
        Ok(()) => tracing::info!("Developer record stored in Airtable"),
        Err(e) => e.log("Airtable"),
    }

    sync_subscriber(&app_state, &developer.newsletter_subscriber()).await;

    Json(SubmitResponse {
        success: true,
        message: "Successfully submitted! We'll be in touch soon.",
        id: developer.id,
    })
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
    id: i64,
}
