use async_trait::async_trait;
use config::DirectoryConfig;
use domain::{
    AuthProvider, ContentItem, ContentStore, DomainError, Snapshots, UserDirectory, UserPatch,
    UserRecord,
};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;

const API_KEY_HEADER: &str = "x-api-key";

fn network(e: reqwest::Error) -> DomainError {
    DomainError::NetworkError(e.to_string())
}

async fn check(response: Response, subject: &str) -> Result<Response, DomainError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(DomainError::UserNotFound(subject.to_string())),
        StatusCode::CONFLICT => Err(DomainError::EmailAlreadyExists(subject.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DomainError::InvalidCredentials),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(DomainError::DirectoryError(format!("{}: {}", status, body)))
        }
    }
}

/// Remote directory client over the hosted document store's REST contract.
///
/// Documents live at `{endpoint}/collections/{name}/documents[/{id}]`. The
/// subscription is fed by a polling task that fetches the collection on a
/// fixed cadence and publishes each result as a replacement snapshot; the
/// task stops once the last handle to the client is dropped. No retry or
/// timeout policy beyond the HTTP client's defaults.
pub struct RestDirectory {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    collection: String,
    tx: watch::Sender<Vec<UserRecord>>,
}

impl RestDirectory {
    pub fn connect(config: &DirectoryConfig) -> Arc<Self> {
        let (tx, _rx) = watch::channel(Vec::new());
        let client = Arc::new(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            collection: config.collection_name.clone(),
            tx,
        });

        Self::start_polling(
            Arc::downgrade(&client),
            Duration::from_millis(config.poll_interval_ms),
        );
        client
    }

    fn start_polling(client: Weak<Self>, interval: Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let Some(directory) = client.upgrade() else {
                    break;
                };
                // Transient fetch failures are skipped; the next tick retries.
                if let Ok(list) = directory.fetch_all().await {
                    directory.tx.send_replace(list);
                }
            }
        });
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/collections/{}/documents",
            self.endpoint, self.collection
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), id)
    }

    async fn fetch_all(&self) -> Result<Vec<UserRecord>, DomainError> {
        let response = self
            .http
            .get(self.documents_url())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(network)?;
        check(response, "").await?.json().await.map_err(network)
    }
}

#[async_trait]
impl UserDirectory for RestDirectory {
    async fn list(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.fetch_all().await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        // The document contract has no query surface, so this is a scan.
        let users = self.fetch_all().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord, DomainError> {
        if record.id.is_some() {
            return Err(DomainError::DirectoryError(
                "identifier is assigned by the store".to_string(),
            ));
        }
        let response = self
            .http
            .post(self.documents_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(record)
            .send()
            .await
            .map_err(network)?;
        check(response, &record.email).await?.json().await.map_err(network)
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, DomainError> {
        let response = self
            .http
            .patch(self.document_url(id))
            .header(API_KEY_HEADER, &self.api_key)
            .json(patch)
            .send()
            .await
            .map_err(network)?;
        check(response, id).await?.json().await.map_err(network)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let response = self
            .http
            .delete(self.document_url(id))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(network)?;
        check(response, id).await?;
        Ok(())
    }

    fn subscribe(&self) -> Snapshots {
        Snapshots::new(self.tx.subscribe())
    }
}

#[derive(Debug, Deserialize)]
struct UidResponse {
    uid: String,
}

/// Identity provider client: create-credential and sign-in only, matching
/// the scope of the hosted service.
pub struct RestAuth {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RestAuth {
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn accounts_url(&self) -> String {
        format!("{}/auth/accounts", self.endpoint)
    }
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn create_credential(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let response = self
            .http
            .post(self.accounts_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network)?;
        let uid: UidResponse = check(response, email).await?.json().await.map_err(network)?;
        Ok(uid.uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let response = self
            .http
            .post(format!("{}/auth/sign-in", self.endpoint))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network)?;
        let uid: UidResponse = check(response, email).await?.json().await.map_err(network)?;
        Ok(uid.uid)
    }

    async fn delete_credential(&self, uid: &str) -> Result<(), DomainError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.accounts_url(), uid))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(network)?;
        check(response, uid).await?;
        Ok(())
    }
}

/// Learning-content collection over the same document contract. No live
/// subscription: the content view reads on demand.
pub struct RestContent {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    collection: String,
}

impl RestContent {
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            collection: "content".to_string(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/collections/{}/documents",
            self.endpoint, self.collection
        )
    }
}

#[async_trait]
impl ContentStore for RestContent {
    async fn list(&self) -> Result<Vec<ContentItem>, DomainError> {
        let response = self
            .http
            .get(self.documents_url())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(network)?;
        check(response, "").await?.json().await.map_err(network)
    }

    async fn create(&self, item: &ContentItem) -> Result<ContentItem, DomainError> {
        let response = self
            .http
            .post(self.documents_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(item)
            .send()
            .await
            .map_err(network)?;
        check(response, &item.title).await?.json().await.map_err(network)
    }

    async fn update(&self, id: &str, item: &ContentItem) -> Result<ContentItem, DomainError> {
        let response = self
            .http
            .patch(format!("{}/{}", self.documents_url(), id))
            .header(API_KEY_HEADER, &self.api_key)
            .json(item)
            .send()
            .await
            .map_err(network)?;
        check(response, id).await?.json().await.map_err(network)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.documents_url(), id))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(network)?;
        check(response, id).await?;
        Ok(())
    }
}
