//! In-memory token registry.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::{Store, StoreError};

/// Thread-safe in-memory registry. Listing is sorted.
#[derive(Debug, Default)]
pub struct MemStore {
    tokens: Mutex<BTreeSet<String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Mutex::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    /// Register a token. Returns false if it was already registered.
    pub fn add(&self, token: impl Into<String>) -> bool {
        self.lock().insert(token.into())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lock().contains(token)
    }

    /// All registered tokens, sorted.
    pub fn list(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated.
        self.tokens.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for MemStore {
    async fn rename(
        &self,
        cancel: &CancellationToken,
        old: &str,
        new: &str,
    ) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        let mut tokens = self.lock();
        if !tokens.remove(old) {
            return Err(StoreError::NotFound(old.to_string()));
        }
        tokens.insert(new.to_string());
        Ok(())
    }

    async fn delete(&self, cancel: &CancellationToken, token: &str) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        self.lock().remove(token);
        Ok(())
    }
}
