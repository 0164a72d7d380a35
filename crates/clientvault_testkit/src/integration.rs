//! Cross-crate integration test helpers.
//!
//! Provides a harness that applies operations to a repository and to a
//! plain `Vec` side by side, so tests can check the stored collection
//! against a model after every step.

use clientvault_core::{Record, RecordId, Repository};
use std::fmt::Debug;

/// One repository operation.
#[derive(Debug, Clone)]
pub enum Op<T> {
    /// Append a record.
    Add(T),
    /// Replace the record with the same ID.
    Update(T),
    /// Remove every record with the ID.
    Remove(RecordId),
}

/// Applies operations to a repository and tracks the expected collection.
pub struct ModelHarness<T: Record> {
    repo: Repository<T>,
    expected: Vec<T>,
}

impl<T> ModelHarness<T>
where
    T: Record + PartialEq + Debug,
{
    /// Creates a harness over an empty repository.
    pub fn new(repo: Repository<T>) -> Self {
        let expected = repo.all().expect("Failed to read repository");
        assert!(expected.is_empty(), "harness needs an empty repository");
        Self {
            repo,
            expected: Vec::new(),
        }
    }

    /// Applies `op` to both sides and returns the repository's answer.
    ///
    /// `Add` always answers `true`.
    pub fn apply(&mut self, op: Op<T>) -> bool {
        match op {
            Op::Add(item) => {
                self.repo.add(item.clone()).expect("Failed to add record");
                self.expected.push(item);
                true
            }
            Op::Update(item) => {
                let found = self.repo.update(item.clone()).expect("Failed to update record");
                let slot = self.expected.iter_mut().find(|e| e.id() == item.id());
                assert_eq!(found, slot.is_some(), "update presence mismatch");
                if let Some(slot) = slot {
                    *slot = item;
                }
                found
            }
            Op::Remove(id) => {
                let removed = self.repo.remove(&id).expect("Failed to remove record");
                let before = self.expected.len();
                self.expected.retain(|e| e.id() != &id);
                assert_eq!(removed, self.expected.len() != before, "remove presence mismatch");
                removed
            }
        }
    }

    /// Asserts the stored collection equals the model.
    pub fn verify(&self) {
        let actual = self.repo.all().expect("Failed to read repository");
        assert_eq!(actual, self.expected);
    }

    /// The model collection.
    pub fn expected(&self) -> &[T] {
        &self.expected
    }
}
