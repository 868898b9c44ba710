pub mod mailer;
pub mod types;
