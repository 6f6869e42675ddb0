use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Storage-side failures.
///
/// `Probe` covers existence checks that failed for a reason other than
/// "not found" — that ambiguity is never collapsed into "absent".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("bucket existence probe failed for '{bucket}'")]
    Probe {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to create bucket '{bucket}'")]
    Create {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write object '{key}'")]
    Put {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("nothing to save for {city}: observation is empty")]
    EmptyObservation { city: String },
}

/// The three object-storage operations the archiver consumes.
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// Name of the bucket this store writes to.
    fn bucket(&self) -> &str;

    /// Lightweight existence probe, not a listing.
    async fn bucket_exists(&self) -> Result<bool, StorageError>;

    async fn create_bucket(&self) -> Result<(), StorageError>;

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}
