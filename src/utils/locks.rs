use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Mutual exclusion scoped by string key. Two operations contend only when
/// they name the same key; the key space is bounded (employees crossed with
/// the week horizon), so guards are kept for the life of the process.
#[derive(Default)]
pub struct KeyedLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: String) -> OwnedMutexGuard<()> {
        let cell = {
            let mut map = self.inner.lock().expect("keyed lock registry poisoned");
            map.entry(key).or_default().clone()
        };
        cell.lock_owned().await
    }
}
