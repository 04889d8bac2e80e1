use crate::form::{FieldError, UserForm};
use domain::{DomainError, Role, Snapshots, Status, UserRecord, UserService};

/// Where the user-management screen currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Listing,
    Creating,
    Editing(String),
}

/// User Management View: the list, the conditional create/edit form and the
/// submit wiring, as one state machine.
///
/// The in-flight flag is the only mutual exclusion: while a create, update
/// or delete is outstanding, further submissions are rejected. In-flight
/// remote calls are never cancelled; navigating away merely drops the
/// subscription and discards their UI feedback.
pub struct UserManagementView {
    service: UserService,
    mode: ViewMode,
    form: UserForm,
    users: Vec<UserRecord>,
    in_flight: bool,
    error: Option<String>,
    field_errors: Vec<FieldError>,
    search: String,
    role_filter: Option<Role>,
    status_filter: Option<Status>,
    pending_delete: Option<String>,
}

impl UserManagementView {
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            mode: ViewMode::Listing,
            form: UserForm::new(),
            users: Vec::new(),
            in_flight: false,
            error: None,
            field_errors: Vec::new(),
            search: String::new(),
            role_filter: None,
            status_filter: None,
            pending_delete: None,
        }
    }

    /// Subscribe to the directory; feed the returned handle's snapshots
    /// back in through [`apply_snapshot`]. Dropping the handle unsubscribes.
    pub fn subscribe(&self) -> Snapshots {
        self.service.subscribe()
    }

    /// Seed the list once at mount, before the first snapshot arrives.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        self.users = self.service.list_users().await?;
        Ok(())
    }

    /// Wholesale replacement: the most recent snapshot wins, no merging.
    pub fn apply_snapshot(&mut self, users: Vec<UserRecord>) {
        self.users = users;
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn set_role_filter(&mut self, role: Option<Role>) {
        self.role_filter = role;
    }

    pub fn set_status_filter(&mut self, status: Option<Status>) {
        self.status_filter = status;
    }

    /// The rows the table shows after search and filters.
    pub fn visible_users(&self) -> Vec<&UserRecord> {
        let needle = self.search.trim().to_lowercase();
        self.users
            .iter()
            .filter(|user| {
                needle.is_empty()
                    || user.full_name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .filter(|user| self.role_filter.map_or(true, |role| user.role == role))
            .filter(|user| {
                self.status_filter
                    .map_or(true, |status| user.status == status)
            })
            .collect()
    }

    /// "Add User": blank form, create mode.
    pub fn open_create(&mut self) {
        self.form.reset();
        self.mode = ViewMode::Creating;
        self.error = None;
        self.field_errors.clear();
    }

    /// "Edit": pre-populate from the selected record (password masked).
    pub fn open_edit(&mut self, id: &str) -> Result<(), DomainError> {
        let record = self
            .users
            .iter()
            .find(|user| user.id.as_deref() == Some(id))
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        self.form.load(record);
        self.mode = ViewMode::Editing(id.to_string());
        self.error = None;
        self.field_errors.clear();
        Ok(())
    }

    /// Cancel returns to the listing and clears the draft.
    pub fn cancel(&mut self) {
        self.form.reset();
        self.mode = ViewMode::Listing;
        self.error = None;
        self.field_errors.clear();
    }

    /// Validate, then create or update through the directory client.
    ///
    /// On success the form is cleared and the view returns to listing. On a
    /// remote failure the form is preserved so the user can retry; retries
    /// are always user-initiated.
    pub async fn submit(&mut self) -> Result<(), DomainError> {
        if self.in_flight {
            return Err(DomainError::SubmissionInFlight);
        }
        // No form is open in listing mode; a stray submit must not touch
        // the draft.
        if self.mode == ViewMode::Listing {
            return Ok(());
        }

        let errors = self.form.field_errors();
        if let Some(first) = errors.first() {
            let blocked = DomainError::validation(first.field, first.unmet.clone());
            self.field_errors = errors;
            return Err(blocked);
        }
        self.field_errors.clear();

        let mode = self.mode.clone();
        self.in_flight = true;
        let result = match mode {
            ViewMode::Creating => match self.form.to_new_user() {
                Ok(new_user) => self.service.create_user(new_user).await.map(|_| ()),
                Err(e) => Err(e),
            },
            ViewMode::Editing(id) => self
                .service
                .update_user(&id, self.form.to_patch())
                .await
                .map(|_| ()),
            ViewMode::Listing => unreachable!("handled above"),
        };
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.form.reset();
                self.mode = ViewMode::Listing;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ask for confirmation before an irreversible delete.
    pub fn request_delete(&mut self, id: &str) -> Result<(), DomainError> {
        if !self.users.iter().any(|user| user.id.as_deref() == Some(id)) {
            return Err(DomainError::UserNotFound(id.to_string()));
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Declining the confirmation blocks the delete entirely.
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<(), DomainError> {
        if self.in_flight {
            return Err(DomainError::SubmissionInFlight);
        }
        let id = self
            .pending_delete
            .take()
            .ok_or(DomainError::DeleteNotConfirmed)?;

        self.in_flight = true;
        let result = self.service.delete_user(&id, true).await;
        self.in_flight = false;

        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory::{MemoryAuth, MemoryDirectory};
    use std::sync::Arc;

    fn view() -> UserManagementView {
        let service = UserService::new(
            Arc::new(MemoryDirectory::new()),
            Arc::new(MemoryAuth::new()),
        );
        UserManagementView::new(service)
    }

    fn fill_valid(form: &mut UserForm) {
        form.full_name = "Ada Lovelace".to_string();
        form.email = "ada@example.com".to_string();
        form.password = "Str0ng!Pass".to_string();
        form.confirm_password = "Str0ng!Pass".to_string();
        form.role = Some(Role::Teacher);
    }

    #[tokio::test]
    async fn submit_is_rejected_while_in_flight() {
        let mut view = view();
        view.open_create();
        fill_valid(view.form_mut());

        view.in_flight = true;
        assert!(matches!(
            view.submit().await,
            Err(DomainError::SubmissionInFlight)
        ));
        assert!(matches!(
            view.confirm_delete().await,
            Err(DomainError::SubmissionInFlight)
        ));
    }

    #[tokio::test]
    async fn submit_from_the_listing_leaves_the_draft_alone() {
        let mut view = view();
        view.form_mut().full_name = "Ada".to_string();

        view.submit().await.unwrap();

        assert_eq!(*view.mode(), ViewMode::Listing);
        assert_eq!(view.form().full_name, "Ada");
        assert!(view.service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_form_blocks_submission_without_a_remote_call() {
        let mut view = view();
        view.open_create();
        view.form_mut().full_name = "Ada Lovelace".to_string();

        assert!(view.submit().await.is_err());
        assert_eq!(*view.mode(), ViewMode::Creating);
        assert!(!view.field_errors().is_empty());
        // Nothing reached the directory.
        assert!(view.service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_and_filters_narrow_the_listing() {
        let mut view = view();
        view.open_create();
        fill_valid(view.form_mut());
        view.submit().await.unwrap();

        view.open_create();
        fill_valid(view.form_mut());
        view.form_mut().full_name = "Grace Hopper".to_string();
        view.form_mut().email = "grace@example.com".to_string();
        view.form_mut().role = Some(Role::Parent);
        view.submit().await.unwrap();

        view.refresh().await.unwrap();
        assert_eq!(view.visible_users().len(), 2);

        view.set_search("grace");
        assert_eq!(view.visible_users().len(), 1);

        view.set_search("");
        view.set_role_filter(Some(Role::Teacher));
        let teachers = view.visible_users();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].full_name, "Ada Lovelace");
    }
}
