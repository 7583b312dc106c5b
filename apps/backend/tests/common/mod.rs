//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up a router over temporary directories
//! - Helper functions for creating test data

#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use study_notes_backend::config::Config;
use study_notes_backend::services::store::ContentStore;
use study_notes_backend::AppState;

/// Test context owning temporary modules and data directories.
///
/// The directories are removed when the context is dropped.
pub struct TestContext {
    pub store: Arc<ContentStore>,
    modules_dir: TempDir,
    data_dir: TempDir,
    app: Router,
}

impl TestContext {
    /// Create a new test context with empty directories.
    pub fn new() -> Self {
        let modules_dir = tempfile::tempdir().expect("Failed to create modules dir");
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");

        let config = Config {
            modules_dir: modules_dir.path().to_path_buf(),
            data_dir: data_dir.path().to_path_buf(),
            ..Config::default()
        };
        let state = AppState::new(config);
        let store = state.store.clone();
        let app = study_notes_backend::app(state);

        Self {
            store,
            modules_dir,
            data_dir,
            app,
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn modules_dir(&self) -> &Path {
        self.modules_dir.path()
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Write a markdown file into the modules directory.
    pub fn write_module_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.modules_dir().join(name);
        std::fs::write(&path, content).expect("Failed to write module file");
        path
    }
}
