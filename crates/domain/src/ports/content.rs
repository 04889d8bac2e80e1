use crate::entities::ContentItem;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Port over the learning-content collection.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ContentItem>, DomainError>;
    async fn create(&self, item: &ContentItem) -> Result<ContentItem, DomainError>;
    async fn update(&self, id: &str, item: &ContentItem) -> Result<ContentItem, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
