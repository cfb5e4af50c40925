pub mod dashboard;
pub mod review;
