mod developer;
mod newsletter_subscriber;
mod subscriber_email;

pub use developer::{Developer, DeveloperSubmission};
pub use newsletter_subscriber::{NewsletterSubscriber, SubscriptionRequest};
pub use subscriber_email::SubscriberEmail;
