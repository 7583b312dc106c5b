//! HTTP route handlers

pub mod ingest;
pub mod modules;
pub mod questions;
