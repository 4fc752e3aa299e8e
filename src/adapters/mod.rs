pub mod cache;
pub mod clock;
pub mod mailer;
pub mod mysql;
