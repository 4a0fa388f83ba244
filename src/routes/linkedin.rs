use crate::{
    app_state::AppState,
    extract::JsonBody,
    integration_error::IntegrationError,
    linkedin_client::LinkedInClient,
    utils::{e400, e500, HttpError},
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Pre-agreed `state` value for the authorization round trip.
// TODO: replace with a random per-flow state stored with a short expiry.
pub const OAUTH_STATE: &str = "developer_network_linkedin_oauth";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/linkedin/auth", get(start_authorization))
        .route("/linkedin/callback", get(authorization_callback))
        .route("/linkedin/exchange", post(exchange_code))
}

#[tracing::instrument(name = "Starting LinkedIn authorization", skip(app_state))]
async fn start_authorization(State(app_state): State<AppState>) -> Json<AuthorizationUrlResponse> {
    if !app_state.linkedin_client.has_client_credentials() {
        tracing::warn!("LinkedIn client credentials not configured, the authorization will fail");
    }

    let oauth_url = app_state
        .linkedin_client
        .authorization_url(&app_state.oauth_redirect_uri, OAUTH_STATE);

    Json(AuthorizationUrlResponse {
        oauth_url: oauth_url.into(),
        message: "Visit this URL to authorize LinkedIn access",
    })
}

#[derive(Deserialize)]
struct CallbackParameters {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[tracing::instrument(
    name = "Handling LinkedIn authorization callback",
    skip(app_state, parameters)
)]
async fn authorization_callback(
    State(app_state): State<AppState>,
    Query(parameters): Query<CallbackParameters>,
) -> Result<Json<AccessTokenResponse>, OAuthError> {
    if let Some(error) = parameters.error {
        return Err(e400(format!(
            "Authorization was not granted: {error} {}",
            parameters.error_description.unwrap_or_default()
        )));
    }

    if parameters.state.as_deref() != Some(OAUTH_STATE) {
        return Err(e400("Invalid state parameter"));
    }

    let code = non_empty_code(parameters.code)?;

    exchange(
        &app_state.linkedin_client,
        &code,
        &app_state.oauth_redirect_uri,
    )
    .await
}

#[derive(Deserialize)]
struct ExchangeRequest {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Manual exchange for deployments where LinkedIn cannot reach the callback.
#[tracing::instrument(name = "Exchanging LinkedIn code manually", skip(app_state, request))]
async fn exchange_code(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<ExchangeRequest>,
) -> Result<Json<AccessTokenResponse>, OAuthError> {
    let code = non_empty_code(request.code)?;
    let redirect_uri = request
        .redirect_uri
        .filter(|uri| !uri.trim().is_empty())
        .unwrap_or_else(|| app_state.oauth_redirect_uri.clone());

    exchange(&app_state.linkedin_client, &code, &redirect_uri).await
}

fn non_empty_code(code: Option<String>) -> Result<String, OAuthError> {
    code.filter(|code| !code.trim().is_empty())
        .ok_or_else(|| e400("Missing authorization code"))
}

async fn exchange(
    linkedin_client: &LinkedInClient,
    code: &str,
    redirect_uri: &str,
) -> Result<Json<AccessTokenResponse>, OAuthError> {
    let access_token = linkedin_client
        .exchange_code_for_token(code, redirect_uri)
        .await
        .map_err(e500)?;

    tracing::info!("LinkedIn access token obtained");

    Ok(Json(AccessTokenResponse {
        access_token: access_token.expose_secret().clone(),
        message: "Store this token as LINKEDIN_ACCESS_TOKEN to enable newsletter sync",
    }))
}

#[derive(Serialize)]
struct AuthorizationUrlResponse {
    oauth_url: String,
    message: &'static str,
}

#[derive(Serialize)]
struct AccessTokenResponse {
    access_token: String,
    message: &'static str,
}

type OAuthError = HttpError<IntegrationError>;
