use crate::entities::ContentItem;
use crate::errors::DomainError;
use crate::ports::ContentStore;
use std::sync::Arc;

/// Content Service - CRUD over the learning-content collection.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn list_content(&self) -> Result<Vec<ContentItem>, DomainError> {
        self.store.list().await
    }

    pub async fn add_content(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        Self::validate(&item)?;
        self.store.create(&item).await
    }

    pub async fn update_content(
        &self,
        id: &str,
        item: ContentItem,
    ) -> Result<ContentItem, DomainError> {
        Self::validate(&item)?;
        self.store.update(id, &item).await
    }

    /// Deletion mirrors the user flow: it only proceeds once the caller has
    /// confirmed.
    pub async fn remove_content(&self, id: &str, confirmed: bool) -> Result<(), DomainError> {
        if !confirmed {
            return Err(DomainError::DeleteNotConfirmed);
        }
        self.store.delete(id).await
    }

    fn validate(item: &ContentItem) -> Result<(), DomainError> {
        if item.title.trim().is_empty() {
            return Err(DomainError::validation(
                "title",
                vec!["title is required".to_string()],
            ));
        }
        if item.category.trim().is_empty() {
            return Err(DomainError::validation(
                "category",
                vec!["category is required".to_string()],
            ));
        }
        Ok(())
    }
}
