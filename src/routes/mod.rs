pub mod developer;
pub mod health_check;
pub mod linkedin;
pub mod newsletter;
