use super::{NewsletterSubscriber, SubscriberEmail};
use serde::Deserialize;
use time::OffsetDateTime;

const NEWSLETTER_SOURCE: &str = "podcast_interview_form";

/// Body of a developer submission. `id` and `createdAt` are assigned by the
/// server, so any values sent by the client are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: SubscriberEmail,
    pub github: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub how_found: String,
}

#[derive(Debug)]
pub struct Developer {
    /// Unix timestamp of `created_at`. Not unique across concurrent submissions.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: SubscriberEmail,
    pub github: String,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub how_found: String,
    pub created_at: OffsetDateTime,
}

impl Developer {
    pub fn from_submission(submission: DeveloperSubmission, created_at: OffsetDateTime) -> Self {
        Self {
            id: created_at.unix_timestamp(),
            first_name: submission.first_name,
            last_name: submission.last_name,
            email: submission.email,
            github: submission.github,
            linkedin: submission.linkedin,
            website: submission.website,
            how_found: submission.how_found,
            created_at,
        }
    }

    pub fn newsletter_subscriber(&self) -> NewsletterSubscriber {
        NewsletterSubscriber {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            source: NEWSLETTER_SOURCE.into(),
            created_at: self.created_at,
        }
    }
}
