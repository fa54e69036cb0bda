//! CLI test helpers
//!
//! Provides Arc<Services> wrappers matching CLI execute() signatures,
//! backed by a scripted API and file storage in a temp directory.

use crate::common::{file_session, FakeApi};
use custlookup::core::config::Config;
use custlookup::core::services::Services;
use std::sync::Arc;
use tempfile::TempDir;

/// Create test services wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_services(api: FakeApi) -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.data_dir = temp_dir.path().to_path_buf();

    let session = file_session(temp_dir.path());
    let services = Arc::new(Services::with_parts(config, session, Arc::new(api)));
    (services, temp_dir)
}

/// Same as [`create_cli_test_services`], already logged in
pub fn create_logged_in_services(api: FakeApi) -> (Arc<Services>, TempDir) {
    let (services, temp_dir) = create_cli_test_services(api);
    services.session.set("tok-cli").expect("Failed to set session");
    (services, temp_dir)
}
