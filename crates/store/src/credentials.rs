//! Credential set persisted as a single TOML map of username -> digest.
//! The whole artifact is rewritten on every change; last writer wins.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{Result, StoreError};

/// Hash a password for storage and lookup. One-way; verification re-hashes
/// the candidate and compares digests.
pub fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Open the store, validating the backing file if present. A malformed
    /// file is a fatal error; a missing file is an empty credential set.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<BTreeMap<String, String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&raw).map_err(|e| StoreError::MalformedCredentials(e.to_string()))
    }

    /// Overwrite the backing file atomically: serialize to a temp sibling,
    /// then rename into place.
    pub async fn save(&self, credentials: &BTreeMap<String, String>) -> Result<()> {
        let raw = toml::to_string(credentials)
            .map_err(|e| StoreError::MalformedCredentials(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// True iff the username exists and the stored digest matches the
    /// password. An unknown username is a plain `false`, not an error.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let credentials = self.load().await?;
        Ok(credentials
            .get(username)
            .is_some_and(|stored| *stored == digest(password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_at(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore {
            path: dir.path().join("users.toml"),
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let mut credentials = BTreeMap::new();
        credentials.insert("admin".to_string(), digest("secret"));
        credentials.insert("bob".to_string(), digest("pw1"));
        store.save(&credentials).await.unwrap();

        assert_eq!(store.load().await.unwrap(), credentials);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users.toml"), "not valid toml [[[").unwrap();

        let err = CredentialStore::open(dir.path().join("users.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedCredentials(_)));
    }

    #[tokio::test]
    async fn test_verify() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let mut credentials = BTreeMap::new();
        credentials.insert("bob".to_string(), digest("pw1"));
        store.save(&credentials).await.unwrap();

        assert!(store.verify("bob", "pw1").await.unwrap());
        assert!(!store.verify("bob", "wrong").await.unwrap());
        assert!(!store.verify("nobody", "pw1").await.unwrap());
    }

    #[test]
    fn test_digest_is_stable_and_one_way() {
        assert_eq!(digest("pw1"), digest("pw1"));
        assert_ne!(digest("pw1"), digest("pw2"));
        assert_ne!(digest("pw1"), "pw1");
    }
}
