use crate::entities::{UserPatch, UserRecord};
use crate::errors::DomainError;
use async_trait::async_trait;
use tokio::sync::watch;

/// Live subscription to the directory collection.
///
/// Each item is a full replacement snapshot of the collection; there is no
/// diffing and no ordering guarantee beyond most-recent-snapshot-wins.
/// Dropping the handle is the unsubscribe.
#[derive(Debug)]
pub struct Snapshots {
    rx: watch::Receiver<Vec<UserRecord>>,
}

impl Snapshots {
    pub fn new(rx: watch::Receiver<Vec<UserRecord>>) -> Self {
        Self { rx }
    }

    /// The most recently delivered snapshot.
    pub fn current(&self) -> Vec<UserRecord> {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot. Returns `None` once the backing
    /// connection has gone away, which ends the sequence.
    pub async fn next(&mut self) -> Option<Vec<UserRecord>> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

/// Port over the remote user collection - the Remote Directory Client.
/// This is what the views and services program against; adapters live in
/// the `directory` crate.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Current contents of the collection.
    async fn list(&self) -> Result<Vec<UserRecord>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Store a new record. The store assigns the identifier and the
    /// `joined` timestamp; any id on the input is rejected.
    async fn create(&self, record: &UserRecord) -> Result<UserRecord, DomainError>;

    /// Merge the supplied fields into an existing record. Never touches the
    /// identifier or the creation timestamp.
    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, DomainError>;

    /// Irreversible. Callers must have obtained explicit confirmation.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// Register for snapshot delivery.
    fn subscribe(&self) -> Snapshots;
}
