use async_trait::async_trait;
use chrono::Utc;
use domain::{
    AuthProvider, ContentItem, ContentStore, DomainError, Snapshots, UserDirectory, UserPatch,
    UserRecord,
};
use sha1::{Digest, Sha1};
use std::collections::HashMap;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

/// In-process directory store used for local development and as the test
/// double. Ids are v4 UUIDs; every mutation publishes a fresh snapshot to
/// all subscribers through a watch channel.
pub struct MemoryDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
    tx: watch::Sender<Vec<UserRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            users: RwLock::new(HashMap::new()),
            tx,
        }
    }

    fn snapshot_of(users: &HashMap<String, UserRecord>) -> Vec<UserRecord> {
        let mut list: Vec<UserRecord> = users.values().cloned().collect();
        // Stable order: oldest first, id as tie-breaker.
        list.sort_by(|a, b| a.joined.cmp(&b.joined).then_with(|| a.id.cmp(&b.id)));
        list
    }

    async fn publish(&self) {
        let users = self.users.read().await;
        self.tx.send_replace(Self::snapshot_of(&users));
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn list(&self) -> Result<Vec<UserRecord>, DomainError> {
        let users = self.users.read().await;
        Ok(Self::snapshot_of(&users))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord, DomainError> {
        if record.id.is_some() {
            return Err(DomainError::DirectoryError(
                "identifier is assigned by the store".to_string(),
            ));
        }

        let now = Utc::now();
        let mut stored = record.clone();
        stored.id = Some(Uuid::new_v4().to_string());
        stored.joined = Some(now);
        stored.last_updated = Some(now);

        {
            let mut users = self.users.write().await;
            users.insert(stored.id.clone().unwrap_or_default(), stored.clone());
        }
        self.publish().await;
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, DomainError> {
        let updated = {
            let mut users = self.users.write().await;
            let record = users
                .get_mut(id)
                .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
            patch.apply(record);
            record.last_updated = Some(Utc::now());
            record.clone()
        };
        self.publish().await;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        {
            let mut users = self.users.write().await;
            if users.remove(id).is_none() {
                return Err(DomainError::UserNotFound(id.to_string()));
            }
        }
        self.publish().await;
        Ok(())
    }

    fn subscribe(&self) -> Snapshots {
        Snapshots::new(self.tx.subscribe())
    }
}

struct Credential {
    uid: String,
    digest: String,
}

/// In-process identity provider. Passwords are kept only as digests; the
/// provider enforces email uniqueness the same way the hosted one does.
pub struct MemoryAuth {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
        }
    }

    fn digest(password: &str) -> String {
        hex::encode(Sha1::digest(password.as_bytes()))
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn create_credential(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let key = email.to_lowercase();
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&key) {
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }
        let uid = Uuid::new_v4().to_string();
        credentials.insert(
            key,
            Credential {
                uid: uid.clone(),
                digest: Self::digest(password),
            },
        );
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let credentials = self.credentials.read().await;
        match credentials.get(&email.to_lowercase()) {
            Some(cred) if cred.digest == Self::digest(password) => Ok(cred.uid.clone()),
            _ => Err(DomainError::InvalidCredentials),
        }
    }

    async fn delete_credential(&self, uid: &str) -> Result<(), DomainError> {
        let mut credentials = self.credentials.write().await;
        let before = credentials.len();
        credentials.retain(|_, cred| cred.uid != uid);
        if credentials.len() == before {
            return Err(DomainError::CredentialNotFound(uid.to_string()));
        }
        Ok(())
    }
}

/// In-process content collection.
pub struct MemoryContent {
    items: RwLock<HashMap<String, ContentItem>>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryContent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryContent {
    async fn list(&self) -> Result<Vec<ContentItem>, DomainError> {
        let items = self.items.read().await;
        let mut list: Vec<ContentItem> = items.values().cloned().collect();
        list.sort_by(|a, b| b.updated.cmp(&a.updated).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create(&self, item: &ContentItem) -> Result<ContentItem, DomainError> {
        let mut stored = item.clone();
        stored.id = Some(Uuid::new_v4().to_string());
        stored.updated = Some(Utc::now());
        let mut items = self.items.write().await;
        items.insert(stored.id.clone().unwrap_or_default(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, item: &ContentItem) -> Result<ContentItem, DomainError> {
        let mut items = self.items.write().await;
        let existing = items
            .get_mut(id)
            .ok_or_else(|| DomainError::ContentNotFound(id.to_string()))?;
        let mut replacement = item.clone();
        replacement.id = existing.id.clone();
        replacement.updated = Some(Utc::now());
        *existing = replacement.clone();
        Ok(replacement)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        if items.remove(id).is_none() {
            return Err(DomainError::ContentNotFound(id.to_string()));
        }
        Ok(())
    }
}
