use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;

use crate::{
    clients::inference::{InferenceClient, OllamaClient},
    config::Config,
    services::{extractor::TextExtractor, session_store::SessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub inference: Arc<dyn InferenceClient>,
    pub extractor: TextExtractor,
}

impl AppState {
    /// Wires the production collaborators described by `config`.
    pub fn from_config(config: Config) -> Self {
        Self {
            sessions: SessionStore::new(Duration::from_secs(config.session_idle_secs)),
            inference: Arc::new(OllamaClient::from_config(&config)),
            extractor: TextExtractor::from_config(&config),
            config,
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn InferenceClient> {
    fn from_ref(state: &AppState) -> Self {
        state.inference.clone()
    }
}

impl FromRef<AppState> for TextExtractor {
    fn from_ref(state: &AppState) -> Self {
        state.extractor.clone()
    }
}
