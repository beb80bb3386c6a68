pub mod common;
pub mod listing;
pub mod restaurant;
pub mod snapshot;
