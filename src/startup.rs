use crate::{
    app_state::AppState,
    configuration::Settings,
    routes::{developer, health_check, linkedin, newsletter},
    telemetry::{request_span, MakeRequestUuid},
};
use anyhow::Context;
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub struct Application {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;
        let local_addr = listener
            .local_addr()
            .context("Failed to read the bound address")?;

        let http_client = reqwest::Client::builder()
            .timeout(config.application.http_timeout())
            .build()
            .context("Failed to build the HTTP client")?;

        let app_state = AppState {
            airtable_client: config.airtable.client(http_client.clone()),
            linkedin_client: config.linkedin.client(http_client)?,
            oauth_redirect_uri: config.linkedin.redirect_uri.clone(),
        };
        log_integrations(&app_state);

        let cors = cors_layer(&config.application.allowed_origins())?;
        let router = router(app_state, cors);

        Ok(Self {
            listener,
            local_addr,
            router,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("Listening on {}", self.local_addr);
        axum::serve(self.listener, self.router).await
    }
}

fn router(app_state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .merge(health_check::router())
        .merge(developer::router())
        .merge(newsletter::router())
        .merge(linkedin::router());

    Router::new()
        .nest("/api", api)
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    if allowed_origins.iter().any(|origin| origin == "*") {
        anyhow::bail!(
            "Wildcard origin `*` is not allowed: credentialed CORS requests need explicit origins"
        );
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid allowed origin `{origin}`"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true))
}

fn log_integrations(app_state: &AppState) {
    tracing::info!(
        airtable = app_state.airtable_client.is_configured(),
        linkedin_oauth = app_state.linkedin_client.has_client_credentials(),
        linkedin_newsletter = app_state.linkedin_client.has_access_token(),
        "Integrations configured"
    );
}
