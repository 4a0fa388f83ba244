use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body extractor that reports every rejection as `400 Bad Request`,
/// whether the body is malformed, missing fields or sent without a JSON content type.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_request(rejection)),
        }
    }
}

fn bad_request(rejection: JsonRejection) -> (StatusCode, String) {
    tracing::warn!(
        error.message = %rejection.body_text(),
        "Rejected request body"
    );

    (
        StatusCode::BAD_REQUEST,
        format!("Invalid JSON data: {}", rejection.body_text()),
    )
}
