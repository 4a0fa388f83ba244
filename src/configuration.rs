use crate::{
    airtable_client::AirtableClient,
    linkedin_client::{LinkedInClient, LinkedInCredentials},
};
use reqwest::Client;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::{path::Path, time::Duration};

const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Plain environment variables understood by the service, mapped onto settings keys.
/// They take precedence over the yaml files and the `APP_` prefixed variables.
const ENV_OVERRIDES: [(&str, &str); 10] = [
    ("PORT", "application.port"),
    ("ALLOWED_ORIGINS", "application.allowed_origins"),
    ("AIRTABLE_API_KEY", "airtable.api_key"),
    ("AIRTABLE_BASE_ID", "airtable.base_id"),
    ("AIRTABLE_TABLE_ID", "airtable.table_id"),
    ("LINKEDIN_CLIENT_ID", "linkedin.client_id"),
    ("LINKEDIN_CLIENT_SECRET", "linkedin.client_secret"),
    ("LINKEDIN_API_KEY", "linkedin.api_key"),
    ("LINKEDIN_ACCESS_TOKEN", "linkedin.access_token"),
    ("LINKEDIN_REDIRECT_URI", "linkedin.redirect_uri"),
];

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub airtable: AirtableSettings,
    pub linkedin: LinkedInSettings,
}

#[derive(Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub allowed_origins: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub http_timeout_milliseconds: u64,
}

impl ApplicationSettings {
    /// Comma separated origin list. Falls back to the local frontend origins when empty.
    pub fn allowed_origins(&self) -> Vec<String> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.map(String::from).to_vec()
        } else {
            origins
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_milliseconds)
    }
}

#[derive(Clone, Deserialize)]
pub struct AirtableSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub base_id: String,
    pub table_id: String,
}

impl AirtableSettings {
    pub fn client(&self, http_client: Client) -> AirtableClient {
        AirtableClient::new(
            http_client,
            self.base_url.clone(),
            self.api_key.clone(),
            self.base_id.clone(),
            self.table_id.clone(),
        )
    }
}

#[derive(Clone, Deserialize)]
pub struct LinkedInSettings {
    pub oauth_base_url: String,
    pub api_base_url: String,
    pub client_id: String,
    pub client_secret: Secret<String>,
    /// Accepted for deployments that still export it. The OAuth and newsletter
    /// endpoints authenticate with client credentials and access tokens only.
    pub api_key: Secret<String>,
    pub access_token: Secret<String>,
    pub redirect_uri: String,
}

impl LinkedInSettings {
    pub fn client(&self, http_client: Client) -> Result<LinkedInClient, anyhow::Error> {
        LinkedInClient::new(
            http_client,
            &self.oauth_base_url,
            self.api_base_url.clone(),
            LinkedInCredentials {
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
                access_token: self.access_token.clone(),
            },
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config_dir = std::env::current_dir()
        .map(|dir| dir.join("configuration"))
        .map_err(|e| {
            config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
        })?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    load_settings(&config_dir, environment, |variable| {
        std::env::var(variable).ok()
    })
}

/// Reads the yaml layers from `config_dir`, then applies the `APP_` variables and
/// finally the plain variables resolved through `lookup`.
pub fn load_settings<F>(
    config_dir: &Path,
    environment: Environment,
    lookup: F,
) -> Result<Settings, config::ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env_config = format!("{}.yaml", environment.as_str());

    let mut builder = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(config_dir.join(env_config)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

    for (variable, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(key, lookup(variable))?;
    }

    builder.build()?.try_deserialize()
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "`{other}` is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
