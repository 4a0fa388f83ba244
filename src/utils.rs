use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt::Debug;

pub fn e400<T>(message: impl Into<String>) -> HttpError<T>
where
    T: Debug,
{
    HttpError::BadRequest(message.into())
}

pub fn e500<T>(error: T) -> HttpError<T>
where
    T: Debug,
{
    HttpError::InternalServerError(error)
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError<T>
where
    T: Debug,
{
    #[error("{0}")]
    BadRequest(String),
    #[error("Something went wrong")]
    InternalServerError(T),
}

impl<T> IntoResponse for HttpError<T>
where
    T: Debug,
{
    fn into_response(self) -> Response {
        tracing::error!("{:#?}", self);

        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Self::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
