use crate::{
    domain::NewsletterSubscriber,
    integration_error::{ensure_created, IntegrationError},
};
use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

pub const OAUTH_SCOPES: [&str; 3] = ["r_liteprofile", "r_emailaddress", "w_member_social"];
const LINKEDIN_VERSION: &str = "202212";

pub struct LinkedInCredentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
    /// Token obtained through the OAuth exchange, used to manage newsletter subscribers.
    pub access_token: Secret<String>,
}

#[derive(Clone)]
pub struct LinkedInClient {
    http_client: Client,
    authorization_endpoint: Url,
    token_endpoint: String,
    api_base_url: String,
    client_id: String,
    client_secret: Secret<String>,
    access_token: Secret<String>,
}

impl LinkedInClient {
    pub fn new(
        http_client: Client,
        oauth_base_url: &str,
        api_base_url: String,
        credentials: LinkedInCredentials,
    ) -> Result<Self, anyhow::Error> {
        let authorization_endpoint = Url::parse(&format!("{oauth_base_url}/authorization"))
            .with_context(|| format!("Invalid LinkedIn OAuth base url `{oauth_base_url}`"))?;

        Ok(Self {
            http_client,
            authorization_endpoint,
            token_endpoint: format!("{oauth_base_url}/accessToken"),
            api_base_url,
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
            access_token: credentials.access_token,
        })
    }

    pub fn has_client_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.expose_secret().is_empty()
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().is_empty()
    }

    /// Builds the URL the user is sent to in order to grant access. No request is made.
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> Url {
        let mut url = self.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", &OAUTH_SCOPES.join(" "));
        url
    }

    #[tracing::instrument(name = "Exchanging authorization code for access token", skip_all)]
    pub async fn exchange_code_for_token(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Secret<String>, IntegrationError> {
        let request_body = TokenRequest {
            grant_type: "authorization_code",
            code,
            redirect_uri,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
        };

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&request_body)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(IntegrationError::RemoteStatus(response.status()));
        }

        match response.json::<TokenResponse>().await {
            Ok(TokenResponse {
                access_token: Some(token),
            }) if !token.is_empty() => Ok(Secret::new(token)),
            Ok(_) => Err(IntegrationError::MissingTokenInResponse),
            Err(e) if e.is_decode() => Err(IntegrationError::MissingTokenInResponse),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(
        name = "Adding newsletter subscriber to LinkedIn",
        skip_all,
        fields(subscriber_email = %subscriber.email, source = %subscriber.source)
    )]
    pub async fn add_subscriber(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), IntegrationError> {
        if !self.has_access_token() {
            return Err(IntegrationError::Unconfigured);
        }

        let url = format!("{}/newsletterSubscriptions", self.api_base_url);
        let request_body = AddSubscriberRequest {
            email: subscriber.email.as_ref(),
            first_name: &subscriber.first_name,
            last_name: &subscriber.last_name,
            source: &subscriber.source,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token.expose_secret())
            .header("LinkedIn-Version", LINKEDIN_VERSION)
            .json(&request_body)
            .send()
            .await?;

        ensure_created(response.status())
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddSubscriberRequest<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    source: &'a str,
}
