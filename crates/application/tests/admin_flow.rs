use application::nav::{post_login_route, Route};
use application::{AdminApp, UserManagementView, ViewMode};
use async_trait::async_trait;
use directory::{MemoryAuth, MemoryDirectory};
use domain::{
    DomainError, Role, Snapshots, UserDirectory, UserPatch, UserRecord, UserService,
};
use std::sync::Arc;

/// Directory double whose writes always fail, for exercising the
/// compensating rollback of the dual-write create flow.
struct UnreachableDirectory {
    inner: MemoryDirectory,
}

impl UnreachableDirectory {
    fn new() -> Self {
        Self {
            inner: MemoryDirectory::new(),
        }
    }
}

#[async_trait]
impl UserDirectory for UnreachableDirectory {
    async fn list(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.inner.list().await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn create(&self, _record: &UserRecord) -> Result<UserRecord, DomainError> {
        Err(DomainError::NetworkError("collection unreachable".to_string()))
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, DomainError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }

    fn subscribe(&self) -> Snapshots {
        self.inner.subscribe()
    }
}

fn fill_ada(view: &mut UserManagementView) {
    let form = view.form_mut();
    form.full_name = "Ada Lovelace".to_string();
    form.email = "ada@example.com".to_string();
    form.password = "Str0ng!Pass".to_string();
    form.confirm_password = "Str0ng!Pass".to_string();
    form.role = Some(Role::Teacher);
}

#[tokio::test]
async fn creating_a_user_adds_exactly_one_record_to_the_next_snapshot() {
    let app = AdminApp::in_memory();
    let mut view = UserManagementView::new(app.users.clone());
    let mut snapshots = view.subscribe();

    view.open_create();
    fill_ada(&mut view);
    view.submit().await.unwrap();

    let snapshot = snapshots.next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    let created = &snapshot[0];
    assert_eq!(created.email, "ada@example.com");
    assert_eq!(created.role, Role::Teacher);
    assert!(created.id.as_deref().is_some_and(|id| !id.is_empty()));
    assert!(created.joined.is_some());

    // The read path carries no password, in any shape.
    let as_json = serde_json::to_value(created).unwrap();
    assert!(as_json.get("password").is_none());

    // Successful submission clears the form and returns to listing.
    assert_eq!(*view.mode(), ViewMode::Listing);
    assert!(view.form().full_name.is_empty());
}

#[tokio::test]
async fn editing_preserves_identifier_and_joined_timestamp() {
    let app = AdminApp::in_memory();
    let mut view = UserManagementView::new(app.users.clone());

    view.open_create();
    fill_ada(&mut view);
    view.submit().await.unwrap();
    view.refresh().await.unwrap();

    let original = view.users()[0].clone();
    let id = original.id.clone().unwrap();

    view.open_edit(&id).unwrap();
    view.form_mut().full_name = "Ada King".to_string();
    view.submit().await.unwrap();
    view.refresh().await.unwrap();

    let updated = &view.users()[0];
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.joined, original.joined);
    assert_eq!(updated.full_name, "Ada King");
    assert_eq!(updated.email, original.email);
}

#[tokio::test]
async fn delete_is_blocked_until_confirmed_and_then_irreversible() {
    let app = AdminApp::in_memory();
    let mut view = UserManagementView::new(app.users.clone());
    let mut snapshots = view.subscribe();

    view.open_create();
    fill_ada(&mut view);
    view.submit().await.unwrap();
    let snapshot = snapshots.next().await.unwrap();
    view.apply_snapshot(snapshot);
    let id = view.users()[0].id.clone().unwrap();

    // Declined confirmation blocks the delete entirely.
    view.request_delete(&id).unwrap();
    view.decline_delete();
    assert!(matches!(
        view.confirm_delete().await,
        Err(DomainError::DeleteNotConfirmed)
    ));
    assert_eq!(app.users.list_users().await.unwrap().len(), 1);

    view.request_delete(&id).unwrap();
    view.confirm_delete().await.unwrap();
    let snapshot = snapshots.next().await.unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn duplicate_email_fails_before_any_directory_write() {
    let app = AdminApp::in_memory();

    let mut view = UserManagementView::new(app.users.clone());
    view.open_create();
    fill_ada(&mut view);
    view.submit().await.unwrap();

    view.open_create();
    fill_ada(&mut view);
    let err = view.submit().await.unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyExists(_)));

    // The failed attempt keeps the form for a user-initiated retry.
    assert_eq!(*view.mode(), ViewMode::Creating);
    assert_eq!(view.form().email, "ada@example.com");
    assert!(view.error().is_some());

    assert_eq!(app.users.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_directory_write_rolls_the_credential_back() {
    let auth = Arc::new(MemoryAuth::new());
    let broken = UserService::new(Arc::new(UnreachableDirectory::new()), auth.clone());

    let mut view = UserManagementView::new(broken);
    view.open_create();
    fill_ada(&mut view);
    let err = view.submit().await.unwrap_err();
    assert!(matches!(err, DomainError::NetworkError(_)));

    // The credential written before the failure is gone again, so the same
    // email can be provisioned once the directory is back.
    let working = UserService::new(Arc::new(MemoryDirectory::new()), auth);
    let mut view = UserManagementView::new(working);
    view.open_create();
    fill_ada(&mut view);
    view.submit().await.unwrap();
}

#[tokio::test]
async fn registration_and_login_route_by_admin_flag() {
    let app = AdminApp::in_memory();

    let registered = app
        .auth
        .register("Ada Lovelace", "ada@example.com", "Str0ng!Pass", "Str0ng!Pass")
        .await
        .unwrap();
    assert_eq!(registered.role, Role::Student);

    let session = app.auth.login("ada@example.com", "Str0ng!Pass").await.unwrap();
    assert!(!session.is_admin);
    assert_eq!(post_login_route(&session), Route::Landing);

    // Sign-in stamped last_login on the directory record.
    let record = app
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(record.last_login.is_some());

    // An administrator created through the admin flow routes to the dashboard.
    let mut view = UserManagementView::new(app.users.clone());
    view.open_create();
    {
        let form = view.form_mut();
        form.full_name = "Grace Hopper".to_string();
        form.email = "grace@example.com".to_string();
        form.password = "Adm1n!Pass".to_string();
        form.confirm_password = "Adm1n!Pass".to_string();
        form.role = Some(Role::Admin);
    }
    view.submit().await.unwrap();

    let session = app.auth.login("grace@example.com", "Adm1n!Pass").await.unwrap();
    assert!(session.is_admin);
    assert_eq!(post_login_route(&session), Route::Dashboard);
}

#[tokio::test]
async fn mismatched_registration_never_reaches_the_backend() {
    let app = AdminApp::in_memory();
    let err = app
        .auth
        .register("Ada Lovelace", "ada@example.com", "Str0ng!Pass", "Other1!aa")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert!(app.users.list_users().await.unwrap().is_empty());
    assert!(app.auth.login("ada@example.com", "Str0ng!Pass").await.is_err());
}
