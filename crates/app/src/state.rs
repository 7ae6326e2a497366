use store::{CredentialStore, DocumentStore};

use crate::config::Config;
use crate::session::Sessions;

/// Main service state - the stores plus the in-process session map.
#[derive(Clone)]
pub struct AppState {
    documents: DocumentStore,
    credentials: CredentialStore,
    sessions: Sessions,
}

impl AppState {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        // 1. Open the document directory, creating it on first run
        let documents = DocumentStore::open(&config.data_dir).await?;
        tracing::debug!(path = %documents.root().display(), "document store opened");

        // 2. Open the credential artifact; a malformed file is fatal here
        //    rather than on the first sign-in
        let credentials = CredentialStore::open(&config.users_path).await?;
        tracing::debug!(path = %credentials.path().display(), "credential store opened");

        Ok(Self {
            documents,
            credentials,
            sessions: Sessions::new(),
        })
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("store setup error: {0}")]
    Store(#[from] store::StoreError),
}
