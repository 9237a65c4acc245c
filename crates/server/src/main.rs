// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod extract;
mod handlers;
mod session;


use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use reserva_api::{ApiError, TokenService};
use reserva_persistence::Persistence;
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Reserva Server - HTTP server for the Reserva space reservation system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "RESERVA_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "RESERVA_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "RESERVA_PORT", default_value_t = 3000)]
    port: u16,

    /// Secret used to sign and verify access tokens
    #[arg(long, env = "RESERVA_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Lifetime of issued access tokens, in minutes
    #[arg(
        long,
        env = "RESERVA_TOKEN_TTL_MINUTES",
        default_value_t = 480,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    token_ttl_minutes: u32,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind an async mutex, so requests touching
/// the database run one at a time.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    tokens: Arc<TokenService>,
}

impl AppState {
    fn new(persistence: Persistence, tokens: TokenService) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            tokens: Arc::new(tokens),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/auth/bootstrap", post(handlers::handle_bootstrap))
        .route("/auth/login", post(handlers::handle_login))
        .route("/auth/me", get(handlers::handle_me))
        .route("/auth/password", put(handlers::handle_change_password))
        .route(
            "/users",
            get(handlers::handle_list_users).post(handlers::handle_create_user),
        )
        .route(
            "/users/{user_id}",
            get(handlers::handle_get_user)
                .put(handlers::handle_update_user)
                .delete(handlers::handle_delete_user),
        )
        .route(
            "/departments",
            get(handlers::handle_list_departments).post(handlers::handle_create_department),
        )
        .route(
            "/departments/{department_id}",
            get(handlers::handle_get_department)
                .put(handlers::handle_update_department)
                .delete(handlers::handle_delete_department),
        )
        .route(
            "/spaces",
            get(handlers::handle_list_spaces).post(handlers::handle_create_space),
        )
        .route(
            "/spaces/{space_id}",
            get(handlers::handle_get_space)
                .put(handlers::handle_update_space)
                .delete(handlers::handle_delete_space),
        )
        .route(
            "/spaces/{space_id}/availability",
            get(handlers::handle_space_availability),
        )
        .route(
            "/reservations",
            get(handlers::handle_list_reservations).post(handlers::handle_create_reservation),
        )
        .route(
            "/reservations/{reservation_id}",
            get(handlers::handle_get_reservation)
                .put(handlers::handle_update_reservation)
                .delete(handlers::handle_delete_reservation),
        )
        .route(
            "/reservations/{reservation_id}/approve",
            post(handlers::handle_approve_reservation),
        )
        .route(
            "/reservations/{reservation_id}/reject",
            post(handlers::handle_reject_reservation),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Reserva Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let tokens: TokenService = TokenService::new(
        args.jwt_secret.as_bytes(),
        time::Duration::minutes(i64::from(args.token_ttl_minutes)),
    );

    let app: Router = build_router(AppState::new(persistence, tokens));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
