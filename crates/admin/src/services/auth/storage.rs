//! Persisted session storage.

use std::future::Future;

use thiserror::Error;
use tower_sessions::Session;

/// Session storage failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(String);

impl StorageError {
    /// Wrap a backend error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<tower_sessions::session::Error> for StorageError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self(err.to_string())
    }
}

/// Async string key/value storage that outlives a single [`super::SessionManager`].
///
/// Over HTTP this is the request's cookie-bound [`Session`]; tests use an
/// in-memory map.
pub trait SessionStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str)
    -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Write a value, replacing any previous one.
    fn set(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

impl SessionStorage for Session {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(Self::get::<String>(self, key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        Ok(self.insert(key, value).await?)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::remove::<String>(self, key).await?;
        Ok(())
    }
}

impl<T: SessionStorage> SessionStorage for &T {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}
