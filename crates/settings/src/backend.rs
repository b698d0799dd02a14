use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::SettingsError;

/// Read/write capability the settings store is given: a flat string
/// key-value map, like browser local storage.
#[async_trait::async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

#[async_trait::async_trait]
impl<T: SettingsBackend + ?Sized> SettingsBackend for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        (**self).set(key, value).await
    }
}

#[async_trait::async_trait]
impl<T: SettingsBackend + ?Sized> SettingsBackend for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        (**self).set(key, value).await
    }
}

/// Process-local backend, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SettingsBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
