pub mod article;
pub mod dashboard;
