//! Thread-safe squeezer handle.
//!
//! One async mutex guards the whole store. A squeeze holds the lock for each
//! phase but not across the delay, so other callers can reset or remove in
//! between; the store's ticket check then rejects the completion.

use super::model::{CitrusSize, LemonId};
use super::store::{SqueezeError, SqueezeOutcome, SqueezerSnapshot, SqueezerStore};
use super::timer::DEFAULT_SQUEEZE_DELAY;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct SharedSqueezer {
    inner: Arc<Mutex<SqueezerStore>>,
    delay: Duration,
}

impl SharedSqueezer {
    pub fn new(store: SqueezerStore) -> Self {
        Self::with_delay(store, DEFAULT_SQUEEZE_DELAY)
    }

    pub fn with_delay(store: SqueezerStore, delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
            delay,
        }
    }

    pub async fn add_object(&self, size: CitrusSize) -> LemonId {
        self.inner.lock().await.add_object(size)
    }

    pub async fn remove_object(&self, id: LemonId) -> bool {
        self.inner.lock().await.remove_object(id)
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }

    pub async fn snapshot(&self) -> SqueezerSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Run both squeeze phases, waiting out the delay in between.
    pub async fn squeeze(&self, id: LemonId) -> Result<SqueezeOutcome, SqueezeError> {
        let ticket = self.inner.lock().await.try_squeeze_object(id)?;
        tokio::time::sleep(self.delay).await;
        self.inner.lock().await.try_complete_squeeze(ticket)
    }

    /// Run `f` with exclusive access to the store.
    pub async fn with_store<R>(&self, f: impl FnOnce(&mut SqueezerStore) -> R) -> R {
        let mut store = self.inner.lock().await;
        f(&mut store)
    }
}
