//! Directory storage contract.
//!
//! The directory maps a normalized company slug to the external assistant
//! serving that company's demo. The backing store is the source of truth;
//! implementations hold no state a restart would lose (the in-memory
//! implementation exists for tests and storeless local development).

use crate::error::DirectoryError;
use amber_dialer_core::{AssistantId, Slug};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A provisioned company demo: the slug embedded in its demo URL and the
/// assistant that answers its chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Normalized company slug, unique within the directory.
    pub slug: Slug,
    /// The external assistant serving this company.
    pub assistant_id: AssistantId,
}

impl CompanyRecord {
    /// Creates a new company record.
    #[must_use]
    pub fn new(slug: Slug, assistant_id: AssistantId) -> Self {
        Self { slug, assistant_id }
    }
}

/// Trait for directory storage backends.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Stores or overwrites the mapping for a slug. Last write wins; a
    /// previously absent slug is not an error.
    async fn put(&self, slug: &Slug, assistant_id: &AssistantId) -> Result<(), DirectoryError>;

    /// Looks up the assistant mapped to a slug.
    ///
    /// Absence is the normal negative result, never an error. Errors mean
    /// the store could not answer.
    async fn get(&self, slug: &Slug) -> Result<Option<AssistantId>, DirectoryError>;

    /// Removes the mapping for a slug, reporting whether anything was
    /// removed.
    async fn delete(&self, slug: &Slug) -> Result<bool, DirectoryError>;

    /// Lists every mapped slug. Diagnostic use only.
    async fn list_all(&self) -> Result<Vec<Slug>, DirectoryError>;
}
