use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::KeyValueStorage;
use crate::Error;

/// Key-value storage persisted as one JSON object file (`key -> value`).
///
/// The whole map is held in memory and the file is rewritten on every
/// `set_item`. A missing file is an empty store; it is created on first write.
#[derive(Debug)]
pub struct JsonFileStorage {
    entries: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
}

impl JsonFileStorage {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, Error> {
        let file_path = path.into();
        let entries = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(
            path = %file_path.display(),
            keys = entries.len(),
            "opened storage file"
        );

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl KeyValueStorage for JsonFileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), Error> {
        // The write lock covers the file write so concurrent calls never interleave
        // on disk. Calls from different operations may still arrive out of order;
        // the last one to take the lock wins.
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        let data = serde_json::to_vec_pretty(&*entries)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::open(dir.path().join("storage.json")).await?;

        assert_eq!(storage.get_item("@GoMarketplace:cart").await?, None);
        assert!(!storage.path().exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_values_survive_reopen() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("storage.json");

        let storage = JsonFileStorage::open(&path).await?;
        storage.set_item("a", "1".to_string()).await?;
        storage.set_item("b", "2".to_string()).await?;
        storage.set_item("a", "10".to_string()).await?;

        let reopened = JsonFileStorage::open(&path).await?;
        assert_eq!(reopened.get_item("a").await?, Some("10".to_string()));
        assert_eq!(reopened.get_item("b").await?, Some("2".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_to_open() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json")?;

        assert!(matches!(
            JsonFileStorage::open(&path).await,
            Err(Error::Decode(_))
        ));
        Ok(())
    }
}
