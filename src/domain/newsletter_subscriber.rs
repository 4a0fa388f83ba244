use super::SubscriberEmail;
use serde::Deserialize;
use time::OffsetDateTime;

const DEFAULT_SOURCE: &str = "newsletter_form";

/// Body of a direct newsletter sign-up. Only the email is mandatory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub email: SubscriberEmail,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug)]
pub struct NewsletterSubscriber {
    pub email: SubscriberEmail,
    pub first_name: String,
    pub last_name: String,
    pub source: String,
    pub created_at: OffsetDateTime,
}

impl NewsletterSubscriber {
    pub fn from_request(request: SubscriptionRequest, created_at: OffsetDateTime) -> Self {
        let source = request
            .source
            .filter(|source| !source.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.into());

        Self {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            source,
            created_at,
        }
    }
}
