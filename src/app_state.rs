use crate::{airtable_client::AirtableClient, linkedin_client::LinkedInClient};

#[derive(Clone)]
pub struct AppState {
    pub airtable_client: AirtableClient,
    pub linkedin_client: LinkedInClient,
    /// Redirect URI registered with LinkedIn, used when the caller does not provide one.
    pub oauth_redirect_uri: String,
}
