pub mod airtable_client;
pub mod app_state;
pub mod configuration;
pub mod domain;
pub mod extract;
pub mod integration_error;
pub mod linkedin_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
