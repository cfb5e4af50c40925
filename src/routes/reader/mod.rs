pub mod articles;
pub mod home;
pub mod profiles;
pub mod subscriptions;
