use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use friends_shared::profile::ProfileData;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::graph::SocialGraph;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixtures: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Default)]
pub struct AppState {
    pub graph: Arc<RwLock<SocialGraph>>,
    /// Host-site profile payloads served for each username.
    pub profiles: Arc<DashMap<String, ProfileData>>,
}

impl AppState {
    /// State seeded with fixture profiles. Every fixture user starts out registered.
    pub fn with_profiles(profiles: HashMap<String, ProfileData>) -> Self {
        let mut graph = SocialGraph::default();
        for username in profiles.keys() {
            if let Err(e) = graph.register(username) {
                tracing::warn!(username, error = %e, "skipping fixture user");
            }
        }
        Self {
            graph: Arc::new(RwLock::new(graph)),
            profiles: Arc::new(profiles.into_iter().collect()),
        }
    }

    /// Fixture profile for `username`, or an empty payload.
    pub fn profile(&self, username: &str) -> ProfileData {
        self.profiles
            .get(username)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

pub fn load_fixtures(path: &Path) -> Result<HashMap<String, ProfileData>, FixtureError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
