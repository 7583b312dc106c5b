//! Business logic services

pub mod ingest;
pub mod store;
