pub mod api;
pub mod error;
pub mod models;
pub mod repository;
pub mod state;
pub mod stats;
pub mod store;
