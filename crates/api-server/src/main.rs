use application::AdminApp;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use config::Config;
use domain::{
    ContentItem, DomainError, DyslexiaLevel, Gender, NewUser, Role, Status, UserPatch, UserRecord,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
struct AppState {
    app: Arc<AdminApp>,
}

#[derive(Debug, Serialize)]
struct UserInfo {
    id: Option<String>,
    full_name: String,
    email: String,
    role: Role,
    age: Option<u32>,
    gender: Option<Gender>,
    status: Status,
    dyslexia_level: Option<DyslexiaLevel>,
    parent_name: Option<String>,
    contact_number: Option<String>,
    relationship: Option<String>,
    description: Option<String>,
    joined: Option<DateTime<Utc>>,
    last_updated: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
}

impl From<UserRecord> for UserInfo {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name,
            email: record.email,
            role: record.role,
            age: record.age,
            gender: record.gender,
            status: record.status,
            dyslexia_level: record.dyslexia_level,
            parent_name: record.parent_name,
            contact_number: record.contact_number,
            relationship: record.relationship,
            description: record.description,
            joined: record.joined,
            last_updated: record.last_updated,
            last_login: record.last_login,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    full_name: String,
    email: String,
    password: String,
    role: Role,
    age: Option<u32>,
    gender: Option<Gender>,
    status: Option<Status>,
    dyslexia_level: Option<DyslexiaLevel>,
    parent_name: Option<String>,
    contact_number: Option<String>,
    relationship: Option<String>,
    description: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        let mut record = UserRecord::new(request.full_name, request.email, request.role);
        record.age = request.age;
        record.gender = request.gender;
        record.status = request.status.unwrap_or_default();
        record.dyslexia_level = request.dyslexia_level;
        record.parent_name = request.parent_name;
        record.contact_number = request.contact_number;
        record.relationship = request.relationship;
        record.description = request.description;
        NewUser {
            record,
            password: request.password,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    full_name: String,
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ConfirmQuery {
    confirm: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    message: String,
    version: String,
    environment: String,
}

/// Maps the domain error taxonomy onto HTTP. Validation failures carry the
/// unmet requirement labels so clients can show them inline.
fn error_response(e: DomainError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &e {
        DomainError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::UserNotFound(_) | DomainError::ContentNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::EmailAlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::InvalidCredentials | DomainError::CredentialNotFound(_) => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::DeleteNotConfirmed => StatusCode::PRECONDITION_REQUIRED,
        DomainError::SubmissionInFlight => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let details = match &e {
        DomainError::Validation { unmet, .. } => Some(unmet.clone()),
        _ => None,
    };
    (
        status,
        Json(ErrorBody {
            error: e.to_string(),
            details,
        }),
    )
}

fn router(state: AppState) -> Router {
    Router::new()
        // User directory endpoints
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // Auth endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Learning content endpoints
        .route("/api/content", get(list_content).post(add_content))
        .route(
            "/api/content/:id",
            patch(update_content).delete(delete_content),
        )
        // System info endpoints
        .route("/api/status", get(get_system_status))
        // Health check
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,tower_http=debug")
        .init();

    info!("🚀 Starting Digilex Admin API Server");

    // Load configuration from environment
    let config = Config::from_env()?;

    info!("📇 Directory backend: {:?}", config.backend);
    info!("🌐 API server will bind to: {}", config.server.bind_address());

    let app_state = AppState {
        app: Arc::new(AdminApp::from_config(&config)),
    };
    let app = router(app_state);

    // Run the server
    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   GET    /api/users          - List all users");
    info!("   POST   /api/users          - Create a user");
    info!("   GET    /api/users/:id      - Get user details");
    info!("   PATCH  /api/users/:id      - Update a user");
    info!("   DELETE /api/users/:id?confirm=true - Delete a user");
    info!("   POST   /api/auth/register  - Self-service registration");
    info!("   POST   /api/auth/login     - Sign in");
    info!("   GET    /api/content        - List learning content");
    info!("   POST   /api/content        - Add learning content");
    info!("   GET    /api/status         - System status");
    info!("   GET    /health             - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

// Handler functions
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    match state.app.users.list_users().await {
        Ok(users) => {
            let user_infos: Vec<UserInfo> = users.into_iter().map(Into::into).collect();
            Json(user_infos).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    info!("📥 Creating user: {}", payload.email);

    match state.app.users.create_user(payload.into()).await {
        Ok(created) => {
            info!("✅ Successfully created user: {}", created.email);
            (StatusCode::CREATED, Json(UserInfo::from(created))).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.app.users.list_users().await {
        Ok(users) => match users.into_iter().find(|u| u.id.as_deref() == Some(&id)) {
            Some(user) => Json(UserInfo::from(user)).into_response(),
            None => error_response(DomainError::UserNotFound(id)).into_response(),
        },
        Err(e) => error_response(e).into_response(),
    }
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> impl IntoResponse {
    match state.app.users.update_user(&id, patch).await {
        Ok(updated) => Json(UserInfo::from(updated)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> impl IntoResponse {
    let confirmed = query.confirm.unwrap_or(false);
    match state.app.users.delete_user(&id, confirmed).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    match state
        .app
        .auth
        .register(
            &payload.full_name,
            &payload.email,
            &payload.password,
            &payload.confirm_password,
        )
        .await
    {
        Ok(created) => {
            info!("✅ Registered new account: {}", created.email);
            (StatusCode::CREATED, Json(UserInfo::from(created))).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    match state.app.auth.login(&payload.email, &payload.password).await {
        Ok(session) => Json(session).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn list_content(State(state): State<AppState>) -> impl IntoResponse {
    match state.app.content.list_content().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn add_content(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> impl IntoResponse {
    match state.app.content.add_content(item).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<ContentItem>,
) -> impl IntoResponse {
    match state.app.content.update_content(&id, item).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> impl IntoResponse {
    let confirmed = query.confirm.unwrap_or(false);
    match state.app.content.remove_content(&id, confirmed).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn get_system_status() -> impl IntoResponse {
    let status = StatusResponse {
        message: "Digilex Admin API Server is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: std::env::var("ENV").unwrap_or_else(|_| "development".to_string()),
    };
    Json(status)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
