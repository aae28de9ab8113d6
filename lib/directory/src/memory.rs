//! In-memory directory backend.
//!
//! Used by tests and storeless local development. State lives only as long
//! as the process; the REST backend remains the source of truth whenever a
//! store is configured.

use crate::error::DirectoryError;
use crate::store::DirectoryStore;
use amber_dialer_core::{AssistantId, Slug};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Directory held in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    records: RwLock<HashMap<String, AssistantId>>,
}

impl MemoryDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectory {
    async fn put(&self, slug: &Slug, assistant_id: &AssistantId) -> Result<(), DirectoryError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(slug.as_str().to_string(), assistant_id.clone());
        Ok(())
    }

    async fn get(&self, slug: &Slug) -> Result<Option<AssistantId>, DirectoryError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(slug.as_str()).cloned())
    }

    async fn delete(&self, slug: &Slug) -> Result<bool, DirectoryError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        Ok(records.remove(slug.as_str()).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Slug>, DirectoryError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.keys().map(|slug| Slug::normalize(slug)).collect())
    }
}

fn poisoned() -> DirectoryError {
    DirectoryError::StoreUnavailable {
        reason: "directory lock poisoned".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let directory = MemoryDirectory::new();
        let slug = Slug::normalize("Acme Solar LLC");
        let assistant = AssistantId::new("asst_1");

        directory.put(&slug, &assistant).await.unwrap();

        assert_eq!(directory.get(&slug).await.unwrap(), Some(assistant));
    }

    #[tokio::test]
    async fn get_of_never_stored_slug_is_none() {
        let directory = MemoryDirectory::new();
        let slug = Slug::normalize("never-stored");

        assert_eq!(directory.get(&slug).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_and_reports() {
        let directory = MemoryDirectory::new();
        let slug = Slug::normalize("Acme Solar LLC");
        directory
            .put(&slug, &AssistantId::new("asst_1"))
            .await
            .unwrap();

        assert!(directory.delete(&slug).await.unwrap());
        assert_eq!(directory.get(&slug).await.unwrap(), None);
        assert!(!directory.delete(&slug).await.unwrap());
    }

    #[tokio::test]
    async fn put_overwrites_last_write_wins() {
        let directory = MemoryDirectory::new();
        let slug = Slug::normalize("Acme Solar LLC");

        directory
            .put(&slug, &AssistantId::new("asst_old"))
            .await
            .unwrap();
        directory
            .put(&slug, &AssistantId::new("asst_new"))
            .await
            .unwrap();

        assert_eq!(
            directory.get(&slug).await.unwrap(),
            Some(AssistantId::new("asst_new"))
        );
    }

    #[tokio::test]
    async fn list_all_returns_every_slug() {
        let directory = MemoryDirectory::new();
        directory
            .put(&Slug::normalize("Acme Solar"), &AssistantId::new("asst_1"))
            .await
            .unwrap();
        directory
            .put(&Slug::normalize("Bright Future"), &AssistantId::new("asst_2"))
            .await
            .unwrap();

        let mut slugs: Vec<String> = directory
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        slugs.sort();

        assert_eq!(slugs, vec!["acme-solar", "bright-future"]);
    }
}
