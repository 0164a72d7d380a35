//! Typed CRUD over whole-collection buckets.
//!
//! Every operation re-reads the full collection, mutates it in memory, and
//! writes the full collection back. Nothing is cached between calls, so two
//! writers racing on one bucket resolve as last-write-wins.
//!
//! Reads never fail on a corrupted bucket: the bucket is logged and treated as
//! empty, and the next write replaces it.

use crate::bucket::{Bucket, BucketStore};
use crate::error::CoreResult;
use crate::model::{Client, CustomField, Order, RecordId, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// A record stored as one element of a bucket's collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Bucket holding the collection.
    const BUCKET: Bucket;

    /// The record's ID.
    fn id(&self) -> &RecordId;
}

impl Record for Client {
    const BUCKET: Bucket = Bucket::Clients;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Order {
    const BUCKET: Bucket = Bucket::Orders;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for CustomField {
    const BUCKET: Bucket = Bucket::CustomFields;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// CRUD access to one collection.
///
/// # Example
///
/// ```rust
/// use clientvault_core::{Vault, VaultConfig};
///
/// let vault = Vault::in_memory(&VaultConfig::default()).unwrap();
/// let clients = vault.clients();
/// assert!(clients.all().unwrap().is_empty());
/// assert!(!clients.remove(&"missing".into()).unwrap());
/// ```
pub struct Repository<T: Record> {
    buckets: BucketStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self::new(self.buckets.clone())
    }
}

impl<T: Record> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("bucket", &T::BUCKET)
            .finish()
    }
}

impl<T: Record> Repository<T> {
    /// Creates a repository over the given bucket store.
    pub fn new(buckets: BucketStore) -> Self {
        Self {
            buckets,
            _marker: PhantomData,
        }
    }

    /// Returns the bucket this repository reads and writes.
    pub fn bucket(&self) -> Bucket {
        T::BUCKET
    }

    /// Returns every record in stored order.
    ///
    /// Returns an empty collection if the bucket is unset or cannot be
    /// decoded.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying store fails.
    pub fn all(&self) -> CoreResult<Vec<T>> {
        match self.buckets.load::<Vec<T>>(T::BUCKET) {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(e) if e.is_corrupted_bucket() => {
                warn!(bucket = %T::BUCKET, error = %e, "failed to decode bucket, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn find(&self, id: &RecordId) -> CoreResult<Option<T>> {
        Ok(self.all()?.into_iter().find(|item| item.id() == id))
    }

    /// Returns the number of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn count(&self) -> CoreResult<usize> {
        Ok(self.all()?.len())
    }

    /// Appends a record and rewrites the collection.
    ///
    /// IDs are not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn add(&self, item: T) -> CoreResult<()> {
        let mut items = self.all()?;
        debug!(bucket = %T::BUCKET, id = %item.id(), "adding record");
        items.push(item);
        self.buckets.save(T::BUCKET, &items)
    }

    /// Replaces the record with the same ID in place.
    ///
    /// Returns `false` and writes nothing if no record has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn update(&self, item: T) -> CoreResult<bool> {
        let mut items = self.all()?;
        let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) else {
            debug!(bucket = %T::BUCKET, id = %item.id(), "update target not found");
            return Ok(false);
        };
        *slot = item;
        self.buckets.save(T::BUCKET, &items)?;
        Ok(true)
    }

    /// Removes every record with the given ID.
    ///
    /// Returns `false` and writes nothing if no record had that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn remove(&self, id: &RecordId) -> CoreResult<bool> {
        let items = self.all()?;
        let before = items.len();
        let kept: Vec<T> = items.into_iter().filter(|item| item.id() != id).collect();

        if kept.len() == before {
            return Ok(false);
        }
        debug!(bucket = %T::BUCKET, id = %id, "removed record");
        self.buckets.save(T::BUCKET, &kept)?;
        Ok(true)
    }

    /// Overwrites the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn replace_all(&self, items: &[T]) -> CoreResult<()> {
        self.buckets.save(T::BUCKET, items)
    }

    /// Removes the bucket entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn clear(&self) -> CoreResult<()> {
        self.buckets.clear(T::BUCKET)
    }
}

impl Repository<Order> {
    /// Returns the orders placed by a client, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn for_client(&self, client_id: &RecordId) -> CoreResult<Vec<Order>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|order| &order.client_id == client_id)
            .collect())
    }
}

/// Access to the singleton user record.
///
/// This repository overwrites unconditionally. The one-account rule is
/// enforced by [`crate::AuthService::register`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    buckets: BucketStore,
}

impl UserRepository {
    /// Creates a user repository over the given bucket store.
    pub fn new(buckets: BucketStore) -> Self {
        Self { buckets }
    }

    /// Returns the stored user.
    ///
    /// Returns `None` if no user is stored or the bucket cannot be decoded.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying store fails.
    pub fn get(&self) -> CoreResult<Option<User>> {
        match self.buckets.load::<User>(Bucket::User) {
            Ok(user) => Ok(user),
            Err(e) if e.is_corrupted_bucket() => {
                warn!(bucket = %Bucket::User, error = %e, "failed to decode user, treating as absent");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Stores the user, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store write fails.
    pub fn save(&self, user: &User) -> CoreResult<()> {
        self.buckets.save(Bucket::User, user)
    }

    /// Removes the stored user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn remove(&self) -> CoreResult<()> {
        self.buckets.clear(Bucket::User)
    }
}
