pub mod articles;
pub mod dashboard;
pub mod login;
pub mod publishers;
pub mod users;
