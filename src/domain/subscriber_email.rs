use serde::Deserialize;
use std::fmt::{self, Display};
use validator::validate_email;

/// An email address that passed validation. Every record relayed to a remote
/// API carries one, so an empty address can never leave the service.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<SubscriberEmail, String> {
        let s = s.trim().to_string();
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("`{s}` email has invalid format"))
        }
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for SubscriberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
