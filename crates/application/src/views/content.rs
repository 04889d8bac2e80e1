use domain::{ContentItem, ContentService, DomainError};

/// Content Management View: the lesson/activity table with add, edit and
/// confirmed delete. Same in-flight discipline as the user view.
pub struct ContentView {
    service: ContentService,
    items: Vec<ContentItem>,
    in_flight: bool,
    error: Option<String>,
    pending_delete: Option<String>,
}

impl ContentView {
    pub fn new(service: ContentService) -> Self {
        Self {
            service,
            items: Vec::new(),
            in_flight: false,
            error: None,
            pending_delete: None,
        }
    }

    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        self.items = self.service.list_content().await?;
        Ok(())
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn add(&mut self, item: ContentItem) -> Result<(), DomainError> {
        self.guarded(|service| async move { service.add_content(item).await.map(|_| ()) })
            .await
    }

    pub async fn update(&mut self, id: &str, item: ContentItem) -> Result<(), DomainError> {
        let id = id.to_string();
        self.guarded(|service| async move { service.update_content(&id, item).await.map(|_| ()) })
            .await
    }

    pub fn request_delete(&mut self, id: &str) -> Result<(), DomainError> {
        if !self.items.iter().any(|item| item.id.as_deref() == Some(id)) {
            return Err(DomainError::ContentNotFound(id.to_string()));
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<(), DomainError> {
        let Some(id) = self.pending_delete.take() else {
            return Err(DomainError::DeleteNotConfirmed);
        };
        self.guarded(|service| async move { service.remove_content(&id, true).await })
            .await
    }

    async fn guarded<F, Fut>(&mut self, op: F) -> Result<(), DomainError>
    where
        F: FnOnce(ContentService) -> Fut,
        Fut: std::future::Future<Output = Result<(), DomainError>>,
    {
        if self.in_flight {
            return Err(DomainError::SubmissionInFlight);
        }
        self.in_flight = true;
        let result = op(self.service.clone()).await;
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.error = None;
                self.refresh().await
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
