use crate::entities::{NewUser, UserPatch, UserRecord};
use crate::errors::DomainError;
use crate::ports::{AuthProvider, Snapshots, UserDirectory};
use crate::validation::{
    validate_email, validate_full_name, validate_password, validate_phone,
};
use std::sync::Arc;

/// User Service - business rules for the administrative user directory.
///
/// Owns the two-write create flow: the auth credential and the directory
/// record are provisioned as one logical operation, with a compensating
/// delete of the credential if the directory write fails.
#[derive(Clone)]
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
    auth: Arc<dyn AuthProvider>,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { directory, auth }
    }

    /// Create a new user after validating every field.
    ///
    /// The credential is written first because the provider enforces email
    /// uniqueness; a duplicate therefore fails before anything is stored.
    pub async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, DomainError> {
        Self::validate_new(&new_user)?;

        let uid = self
            .auth
            .create_credential(&new_user.record.email, &new_user.password)
            .await?;

        match self.directory.create(&new_user.record).await {
            Ok(created) => Ok(created),
            Err(e) => {
                // Roll the credential back so the pair never splits.
                let _ = self.auth.delete_credential(&uid).await;
                Err(e)
            }
        }
    }

    /// Merge the supplied fields into an existing record. The identifier,
    /// the creation timestamp and the password are never part of an update.
    pub async fn update_user(
        &self,
        id: &str,
        patch: UserPatch,
    ) -> Result<UserRecord, DomainError> {
        Self::validate_patch(&patch)?;
        self.directory.update(id, &patch).await
    }

    /// Delete a user. Irreversible, so the caller has to pass the outcome
    /// of an explicit confirmation step.
    pub async fn delete_user(&self, id: &str, confirmed: bool) -> Result<(), DomainError> {
        if !confirmed {
            return Err(DomainError::DeleteNotConfirmed);
        }
        self.directory.delete(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.directory.list().await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        self.directory.find_by_email(email).await
    }

    pub fn subscribe(&self) -> Snapshots {
        self.directory.subscribe()
    }

    fn validate_new(new_user: &NewUser) -> Result<(), DomainError> {
        let name = validate_full_name(&new_user.record.full_name);
        if !name.is_valid() {
            return Err(DomainError::validation("full_name", name.unmet_labels()));
        }
        let email = validate_email(&new_user.record.email);
        if !email.is_valid() {
            return Err(DomainError::validation("email", email.unmet_labels()));
        }
        let password = validate_password(&new_user.password);
        if !password.is_valid() {
            return Err(DomainError::validation("password", password.unmet_labels()));
        }
        if let Some(contact) = &new_user.record.contact_number {
            let phone = validate_phone(contact);
            if !phone.is_valid() {
                return Err(DomainError::validation("contact_number", phone.unmet_labels()));
            }
        }
        Ok(())
    }

    fn validate_patch(patch: &UserPatch) -> Result<(), DomainError> {
        if let Some(full_name) = &patch.full_name {
            let name = validate_full_name(full_name);
            if !name.is_valid() {
                return Err(DomainError::validation("full_name", name.unmet_labels()));
            }
        }
        if let Some(email) = &patch.email {
            let verdict = validate_email(email);
            if !verdict.is_valid() {
                return Err(DomainError::validation("email", verdict.unmet_labels()));
            }
        }
        if let Some(contact) = &patch.contact_number {
            let phone = validate_phone(contact);
            if !phone.is_valid() {
                return Err(DomainError::validation("contact_number", phone.unmet_labels()));
            }
        }
        Ok(())
    }
}
