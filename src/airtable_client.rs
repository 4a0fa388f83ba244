use crate::{
    domain::Developer,
    integration_error::{ensure_created, IntegrationError},
};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use time::OffsetDateTime;

time::serde::format_description!(
    airtable_timestamp,
    OffsetDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
);

#[derive(Clone)]
pub struct AirtableClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    base_id: String,
    table_id: String,
}

impl AirtableClient {
    pub fn new(
        http_client: Client,
        base_url: String,
        api_key: Secret<String>,
        base_id: String,
        table_id: String,
    ) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            base_id,
            table_id,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
            && !self.base_id.is_empty()
            && !self.table_id.is_empty()
    }

    #[tracing::instrument(
        name = "Adding developer record to Airtable",
        skip_all,
        fields(developer_email = %developer.email)
    )]
    pub async fn add_record(&self, developer: &Developer) -> Result<(), IntegrationError> {
        if !self.is_configured() {
            return Err(IntegrationError::Unconfigured);
        }

        let url = format!("{}/{}/{}", self.base_url, self.base_id, self.table_id);
        let request_body = CreateRecordsRequest {
            records: [Record {
                fields: DeveloperFields::from(developer),
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        ensure_created(response.status())
    }
}

#[derive(Serialize)]
struct CreateRecordsRequest<'a> {
    records: [Record<'a>; 1],
}

#[derive(Serialize)]
struct Record<'a> {
    fields: DeveloperFields<'a>,
}

#[derive(Serialize)]
struct DeveloperFields<'a> {
    #[serde(rename = "First Name")]
    first_name: &'a str,
    #[serde(rename = "Last Name")]
    last_name: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Github")]
    github: &'a str,
    #[serde(rename = "LinkedIn")]
    linkedin: &'a str,
    #[serde(rename = "Website")]
    website: &'a str,
    #[serde(rename = "How Found")]
    how_found: &'a str,
    #[serde(rename = "Created At", with = "airtable_timestamp")]
    created_at: OffsetDateTime,
}

impl<'a> From<&'a Developer> for DeveloperFields<'a> {
    fn from(developer: &'a Developer) -> Self {
        Self {
            first_name: &developer.first_name,
            last_name: &developer.last_name,
            email: developer.email.as_ref(),
            github: &developer.github,
            linkedin: developer.linkedin.as_deref().unwrap_or_default(),
            website: developer.website.as_deref().unwrap_or_default(),
            how_found: &developer.how_found,
            created_at: developer.created_at,
        }
    }
}
