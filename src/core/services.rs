//! Shared service container
//!
//! Wires the durable store, cookie jar, session and backend client
//! together from one configuration.

use crate::core::api::{CustomerApi, HttpApi};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::search::{SearchController, SuggestionPipeline};
use crate::core::storage::{CookieJar, FileStore, SessionStore};
use std::sync::Arc;

/// File backing the durable token store
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// File backing the cookie jar
pub const COOKIE_FILE: &str = "cookies.json";

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Owner of the auth token
    pub session: Arc<SessionStore>,

    /// Backend client
    pub api: Arc<dyn CustomerApi>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Build services backed by files under `storage.data_dir`.
    ///
    /// The session cache is rehydrated from durable storage before
    /// anything reads it.
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = &config.storage.data_dir;
        std::fs::create_dir_all(data_dir)?;

        let durable = Arc::new(FileStore::new(data_dir.join(LOCAL_STORAGE_FILE)));
        let cookies = CookieJar::new(Arc::new(FileStore::new(data_dir.join(COOKIE_FILE))));
        let session = Arc::new(SessionStore::new(
            durable,
            cookies,
            config.session.cookie_max_age_sec,
        ));
        session.init()?;

        let api = Arc::new(HttpApi::new(&config.api, Arc::clone(&session))?);

        Ok(Self::with_parts(config, session, api))
    }

    /// Assemble from prebuilt parts
    pub fn with_parts(
        config: Config,
        session: Arc<SessionStore>,
        api: Arc<dyn CustomerApi>,
    ) -> Self {
        Self {
            session,
            api,
            config: Arc::new(config),
        }
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(Arc::clone(&self.api), Arc::clone(&self.session))
    }

    /// Start a suggestion pipeline with the configured quiet period.
    /// Requires a tokio runtime.
    pub fn suggestion_pipeline(&self) -> SuggestionPipeline {
        SuggestionPipeline::start(
            Arc::clone(&self.api),
            self.config.suggestions.quiet_period(),
        )
    }
}
