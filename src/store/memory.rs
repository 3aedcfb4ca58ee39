//! In-process key-value backend.

use super::KeyValueBackend;
use crate::errors::AppResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value backend held in memory. Useful for tests and one-shot analysis.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        values.remove(key);
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> AppResult<()> {
        let mut values = self.values.lock().unwrap_or_else(|p| p.into_inner());
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}
