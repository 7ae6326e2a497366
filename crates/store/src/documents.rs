//! Flat-directory document store. Filenames are the document keys; there
//! are no subdirectories and no metadata beyond the file content itself.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a user-supplied name to a path inside the managed directory.
    /// Names carrying separators or traversal components are rejected, not
    /// reduced: a name must already be a plain base name.
    fn document_path(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(base)), None) if base == OsStr::new(name) => {}
            _ => return Err(StoreError::InvalidName(name.to_string())),
        }
        Ok(self.root.join(name))
    }

    /// List document names in directory order. Recomputed on every call;
    /// anything that is not a regular file is skipped.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    pub async fn read(&self, name: &str) -> Result<String> {
        let path = self.document_path(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create-or-overwrite; no existence precondition.
    pub async fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.document_path(name)?;
        tokio::fs::write(&path, content).await?;
        Ok(())
    }

    /// Create an empty document. An existing document of the same name is
    /// silently overwritten.
    pub async fn create(&self, name: &str) -> Result<()> {
        self.write(name, "").await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.document_path(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        let path = self.document_path(name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_store() -> (DocumentStore, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(temp_dir.path()).await.unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_create_lists_empty_document() {
        let (store, _dir) = open_store().await;

        store.create("about.md").await.unwrap();

        let names = store.list().await.unwrap();
        assert!(names.contains(&"about.md".to_string()));
        assert_eq!(store.read("about.md").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_write_read_round_trip() {
        let (store, _dir) = open_store().await;
        let content = "# Heading\n\nsome *markdown* text\n";

        store.write("notes.md", content).await.unwrap();

        assert_eq!(store.read("notes.md").await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (store, _dir) = open_store().await;

        let err = store.read("ghost.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(name) if name == "ghost.txt"));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let (store, _dir) = open_store().await;
        store.write("gone.txt", "bye").await.unwrap();

        store.delete("gone.txt").await.unwrap();

        assert!(!store.exists("gone.txt").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (store, _dir) = open_store().await;

        let err = store.delete("ghost.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_overwrites_existing() {
        let (store, _dir) = open_store().await;
        store.write("notes.txt", "old content").await.unwrap();

        store.create("notes.txt").await.unwrap();

        assert_eq!(store.read("notes.txt").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let (store, _dir) = open_store().await;

        for name in ["../escape.txt", "a/b.txt", "/etc/passwd", "..", ".", "", "   "] {
            let err = store.read(name).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidName(_)), "accepted {:?}", name);

            let err = store.write(name, "x").await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidName(_)), "wrote {:?}", name);
        }

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_skips_subdirectories() {
        let (store, dir) = open_store().await;
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        store.write("a.txt", "x").await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["a.txt".to_string()]);
    }
}
