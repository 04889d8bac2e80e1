use crate::entities::{Role, Session, UserPatch, UserRecord};
use crate::errors::DomainError;
use crate::ports::{AuthProvider, UserDirectory};
use crate::validation::{
    validate_email, validate_full_name, validate_password, REQ_PASSWORDS_MATCH,
};
use chrono::Utc;
use std::sync::Arc;

/// Auth Service - self-service registration and sign-in.
///
/// Registration performs the same dual write as the admin create flow
/// (credential first, then directory record, with compensating rollback);
/// self-registered accounts always start as non-admin students.
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthProvider>,
    directory: Arc<dyn UserDirectory>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthProvider>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { auth, directory }
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserRecord, DomainError> {
        let name = validate_full_name(full_name);
        if !name.is_valid() {
            return Err(DomainError::validation("full_name", name.unmet_labels()));
        }
        let email_verdict = validate_email(email);
        if !email_verdict.is_valid() {
            return Err(DomainError::validation("email", email_verdict.unmet_labels()));
        }
        let password_verdict = validate_password(password);
        if !password_verdict.is_valid() {
            return Err(DomainError::validation(
                "password",
                password_verdict.unmet_labels(),
            ));
        }
        if confirm_password != password {
            return Err(DomainError::validation(
                "confirm_password",
                vec![REQ_PASSWORDS_MATCH.to_string()],
            ));
        }

        let uid = self.auth.create_credential(email.trim(), password).await?;

        let record = UserRecord::new(
            full_name.trim().to_string(),
            email.trim().to_string(),
            Role::Student,
        );
        match self.directory.create(&record).await {
            Ok(created) => Ok(created),
            Err(e) => {
                let _ = self.auth.delete_credential(&uid).await;
                Err(e)
            }
        }
    }

    /// Sign in and stamp `last_login` on the matching directory record.
    /// The stamp is best effort: a directory hiccup must not fail a login
    /// the provider already accepted.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let uid = self.auth.sign_in(email.trim(), password).await?;
        let now = Utc::now();

        let record = self.directory.find_by_email(email.trim()).await.ok().flatten();
        let is_admin = record.as_ref().map(UserRecord::is_admin).unwrap_or(false);
        if let Some(id) = record.and_then(|r| r.id) {
            let _ = self.directory.update(&id, &UserPatch::last_login(now)).await;
        }

        Ok(Session {
            uid,
            email: email.trim().to_string(),
            is_admin,
            signed_in_at: now,
        })
    }
}
