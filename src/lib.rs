pub mod api;
pub mod calendar;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod schedule;
pub mod store;
pub mod utils;
