pub mod article;
pub mod bootstrap;
pub mod mariadb_service;
pub mod password_reset;
pub mod publisher;
pub mod subscription;
pub mod user;
