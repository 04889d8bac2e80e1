use crate::errors::DomainError;
use async_trait::async_trait;

/// Port over the external identity provider.
///
/// Email uniqueness is enforced here, not by the directory layer. The
/// provider never hands a password back; `create_credential` returns only
/// the opaque uid.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_credential(&self, email: &str, password: &str) -> Result<String, DomainError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, DomainError>;

    /// Compensating action for the dual-write create flow: removes a
    /// credential that was provisioned before the directory write failed.
    async fn delete_credential(&self, uid: &str) -> Result<(), DomainError>;
}
