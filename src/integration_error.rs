use reqwest::StatusCode;

/// Failure of an outbound call to one of the remote APIs.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error("Integration credentials are not configured")]
    Unconfigured,
    #[error("Failed to reach the remote API")]
    TransportFailure(#[from] reqwest::Error),
    #[error("Remote API returned status {0}")]
    RemoteStatus(StatusCode),
    #[error("Access token not found in response")]
    MissingTokenInResponse,
}

impl IntegrationError {
    /// Logs a failed relay. Missing credentials are expected in development and
    /// only produce a warning.
    pub fn log(&self, integration: &str) {
        match self {
            Self::Unconfigured => {
                tracing::warn!("{integration} credentials not configured, skipping sync")
            }
            e => tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to sync with {integration}"
            ),
        }
    }
}

/// Accepts `200 OK` and `201 Created`, the two statuses the create endpoints answer with.
pub(crate) fn ensure_created(status: StatusCode) -> Result<(), IntegrationError> {
    match status {
        StatusCode::OK | StatusCode::CREATED => Ok(()),
        status => Err(IntegrationError::RemoteStatus(status)),
    }
}
