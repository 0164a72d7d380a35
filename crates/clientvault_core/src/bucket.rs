//! Named buckets and the codec-backed store that reads and writes them.

use crate::error::CoreResult;
use clientvault_codec::Codec;
use clientvault_storage::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The four reserved storage slots.
///
/// Each bucket holds one encoded value: the user record, or a whole
/// collection of clients, orders, or custom fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// The registered user, if any.
    User,
    /// All clients.
    Clients,
    /// All orders.
    Orders,
    /// All custom field definitions.
    CustomFields,
}

impl Bucket {
    /// All buckets.
    pub const ALL: [Bucket; 4] = [
        Bucket::User,
        Bucket::Clients,
        Bucket::Orders,
        Bucket::CustomFields,
    ];

    /// Buckets holding record data, as opposed to authentication state.
    pub const DATA: [Bucket; 3] = [Bucket::Clients, Bucket::Orders, Bucket::CustomFields];

    /// Storage key for the bucket.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Bucket::User => "user",
            Bucket::Clients => "clients",
            Bucket::Orders => "orders",
            Bucket::CustomFields => "customFields",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key/value store with a codec layered over it.
///
/// Values are encoded into envelopes on the way in and decoded on the way
/// out. Cloning is cheap; clones share the same store and codec.
#[derive(Clone)]
pub struct BucketStore {
    store: Arc<dyn KeyValueStore>,
    codec: Arc<Codec>,
}

impl BucketStore {
    /// Creates a bucket store.
    pub fn new(store: Arc<dyn KeyValueStore>, codec: Codec) -> Self {
        Self {
            store,
            codec: Arc::new(codec),
        }
    }

    /// Reads and decodes a bucket.
    ///
    /// Returns `None` if the bucket has never been written or was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the envelope does not decode.
    pub fn load<T: DeserializeOwned>(&self, bucket: Bucket) -> CoreResult<Option<T>> {
        match self.store.read(bucket.name())? {
            Some(envelope) => Ok(Some(self.codec.decode(&envelope)?)),
            None => Ok(None),
        }
    }

    /// Encodes a value and writes it to a bucket, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn save<T: Serialize + ?Sized>(&self, bucket: Bucket, value: &T) -> CoreResult<()> {
        let envelope = self.codec.encode(value)?;
        self.store.write(bucket.name(), &envelope)?;
        debug!(bucket = %bucket, bytes = envelope.len(), "saved bucket");
        Ok(())
    }

    /// Removes a bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn clear(&self, bucket: Bucket) -> CoreResult<()> {
        self.store.remove(bucket.name())?;
        debug!(bucket = %bucket, "cleared bucket");
        Ok(())
    }

    /// Returns `true` if the bucket holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn is_set(&self, bucket: Bucket) -> CoreResult<bool> {
        Ok(self.store.contains(bucket.name())?)
    }

    /// Reads the raw envelope text of a bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn read_raw(&self, bucket: Bucket) -> CoreResult<Option<String>> {
        Ok(self.store.read(bucket.name())?)
    }

    /// Writes raw text into a bucket, bypassing the codec.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn write_raw(&self, bucket: Bucket, raw: &str) -> CoreResult<()> {
        Ok(self.store.write(bucket.name(), raw)?)
    }
}

impl fmt::Debug for BucketStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketStore")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
