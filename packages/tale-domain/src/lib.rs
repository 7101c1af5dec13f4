pub mod query;
pub mod ranking;
pub mod story;
