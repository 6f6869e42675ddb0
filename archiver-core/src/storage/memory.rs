use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{ObjectStore, StorageError};

/// In-memory object store used by tests.
///
/// Clones share state, so a test can hand one clone to the archiver and
/// inspect the other afterwards.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    bucket: String,
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    bucket_exists: bool,
    create_calls: usize,
    objects: HashMap<String, StoredObject>,
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// How many create calls were issued; idempotence checks read this.
    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.state.lock().unwrap().objects.get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.state.lock().unwrap().objects.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> Result<bool, StorageError> {
        Ok(self.state.lock().unwrap().bucket_exists)
    }

    async fn create_bucket(&self) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        state.bucket_exists = true;
        Ok(())
    }

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();

        if !state.bucket_exists {
            return Err(StorageError::Put {
                key: key.to_string(),
                source: format!("bucket '{}' does not exist", self.bucket).into(),
            });
        }

        state.objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_without_a_bucket() {
        let store = MemoryStore::new("weather-archive");

        assert!(!store.bucket_exists().await.unwrap());
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn create_makes_the_bucket_visible() {
        let store = MemoryStore::new("weather-archive");

        store.create_bucket().await.unwrap();

        assert!(store.bucket_exists().await.unwrap());
        assert_eq!(store.create_calls(), 1);
    }

    #[tokio::test]
    async fn put_fails_without_a_bucket() {
        let store = MemoryStore::new("weather-archive");

        let err = store
            .put_object("k", b"{}".to_vec(), "application/json")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Put { .. }));
        assert_eq!(store.object_count(), 0);
    }

    #[tokio::test]
    async fn put_stores_body_and_content_type() {
        let store = MemoryStore::new("weather-archive");
        store.create_bucket().await.unwrap();

        store
            .put_object("weather-data/Accra-x.json", b"{}".to_vec(), "application/json")
            .await
            .unwrap();

        let object = store.object("weather-data/Accra-x.json").expect("object must exist");
        assert_eq!(object.body, b"{}");
        assert_eq!(object.content_type, "application/json");
    }
}
