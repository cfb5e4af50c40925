pub mod admin;
pub mod article;
pub mod error;
pub mod mail;
pub mod permission;
pub mod publisher;
pub mod response;
pub mod subscription;
pub mod user;
