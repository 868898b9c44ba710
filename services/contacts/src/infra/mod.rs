pub mod association;
pub mod db;
pub mod mailer;
pub mod models;
pub mod password;
pub mod preload;
pub mod repository;
pub mod resource;
