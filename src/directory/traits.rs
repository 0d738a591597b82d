//! Trait abstraction for the country/university directory to enable mocking in tests

use crate::error::LookupError;
use async_trait::async_trait;

/// Read-only directory queries used by the guided program selection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// List every country name
    async fn list_countries(&self) -> Result<Vec<String>, LookupError>;

    /// List university names for a country
    async fn list_universities(&self, country: &str) -> Result<Vec<String>, LookupError>;
}
