// Copyright 2025 LNU IT Services Office
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::auth::auth_middleware;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handlers;
use crate::middleware::{rate_limit_middleware, RateLimitState};
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

/// REST API server
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = AppState::new(config.clone()).await?;
        Ok(Self::with_state(config, state))
    }

    /// Construct a server from an already-built app state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = Self::build_app(state, &config);
        Self { config, app }
    }

    /// Build the Axum application with routes and middleware
    pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
        // Build middleware stack
        let middleware_stack = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(from_fn({
                let rate_limit_state =
                    std::sync::Arc::new(RateLimitState::new(config.rate_limit.clone()));
                move |req, next| {
                    let state = std::sync::Arc::clone(&rate_limit_state);
                    rate_limit_middleware(state, req, next)
                }
            }))
            .layer({
                if config.enable_cors {
                    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
                } else {
                    CorsLayer::new()
                        .allow_origin(vec![
                            HeaderValue::from_static("http://localhost:3000"),
                            HeaderValue::from_static("http://127.0.0.1:3000"),
                        ])
                        .allow_methods([
                            axum::http::Method::GET,
                            axum::http::Method::POST,
                            axum::http::Method::PATCH,
                            axum::http::Method::PUT,
                            axum::http::Method::DELETE,
                        ])
                        .allow_headers([
                            axum::http::header::AUTHORIZATION,
                            axum::http::header::CONTENT_TYPE,
                        ])
                }
            })
            .layer(from_fn({
                let auth_state = state.clone();
                move |req, next| {
                    let state = auth_state.clone();
                    auth_middleware(state, req, next)
                }
            }));

        // API routes
        let api_routes = Router::new()
            // Health and database check
            .route("/health", get(handlers::health::health_check))
            .route("/db-test", get(handlers::health::db_test))
            // Auth
            .route("/auth/login/admin", post(handlers::auth::login_admin))
            .route("/auth/login/faculty", post(handlers::auth::login_faculty))
            .route("/auth/me", get(handlers::auth::me))
            // Categories
            .route("/categories", post(handlers::categories::create_category))
            .route("/categories", get(handlers::categories::list_categories))
            .route("/categories/:id", get(handlers::categories::get_category))
            .route(
                "/categories/:id",
                patch(handlers::categories::update_category),
            )
            .route(
                "/categories/:id",
                delete(handlers::categories::delete_category),
            )
            // Rooms
            .route("/rooms", post(handlers::rooms::create_room))
            .route("/rooms", get(handlers::rooms::list_rooms))
            .route("/rooms/:id", get(handlers::rooms::get_room))
            .route("/rooms/:id", patch(handlers::rooms::update_room))
            .route("/rooms/:id", delete(handlers::rooms::delete_room))
            // Faculty
            .merge(faculty_routes("/faculty"))
            .merge(faculty_routes("/faculties"))
            // Equipment
            .merge(equipment_routes("/equipment"))
            .merge(equipment_routes("/equipments"))
            // History
            .route(
                "/status-history",
                post(handlers::status_history::create_entry),
            )
            .route(
                "/status-history/equipment/:equipment_id",
                get(handlers::status_history::list_for_equipment),
            )
            .route(
                "/location-history",
                post(handlers::location_history::create_entry),
            )
            .route(
                "/location-history/equipment/:equipment_id",
                get(handlers::location_history::list_for_equipment),
            )
            // Password reset requests
            .route(
                "/password-requests",
                post(handlers::password_requests::create_request),
            )
            .route(
                "/password-requests",
                get(handlers::password_requests::list_requests),
            )
            .route(
                "/password-requests/:id/resolve",
                post(handlers::password_requests::resolve_request),
            )
            // Users
            .merge(user_routes("/users"))
            .merge(user_routes("/user"))
            // Dashboard and activity feed
            .route("/dashboard/stats", get(handlers::dashboard::stats))
            .route(
                "/activities/recent",
                get(handlers::activities::recent_activities),
            );

        Router::new().nest("/api", api_routes).with_state(state).layer(middleware_stack)
    }

    /// Run the server
    pub async fn run(self) -> ServerResult<()> {
        let addr = self.config.bind_addr;
        info!("Starting server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.app)
            .await
            .map_err(|err| ServerError::Internal(format!("REST server error: {err}")))?;

        Ok(())
    }

    /// Get the bind address
    pub fn addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}

fn faculty_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, post(handlers::faculty::create_faculty))
        .route(prefix, get(handlers::faculty::list_faculty))
        .route(
            &format!("{prefix}/:id"),
            get(handlers::faculty::get_faculty),
        )
        .route(
            &format!("{prefix}/:id"),
            patch(handlers::faculty::update_faculty),
        )
        .route(
            &format!("{prefix}/:id"),
            put(handlers::faculty::update_faculty),
        )
        .route(
            &format!("{prefix}/:id"),
            delete(handlers::faculty::delete_faculty),
        )
}

fn equipment_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, post(handlers::equipment::create_equipment))
        .route(prefix, get(handlers::equipment::list_equipment))
        .route(
            &format!("{prefix}/summary"),
            get(handlers::equipment::summary),
        )
        .route(
            &format!("{prefix}/:id"),
            get(handlers::equipment::get_equipment),
        )
        .route(
            &format!("{prefix}/:id"),
            patch(handlers::equipment::update_equipment),
        )
        .route(
            &format!("{prefix}/:id"),
            put(handlers::equipment::update_equipment),
        )
        .route(
            &format!("{prefix}/:id"),
            delete(handlers::equipment::delete_equipment),
        )
        .route(
            &format!("{prefix}/:id/timeline"),
            get(handlers::equipment::timeline),
        )
}

fn user_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, post(handlers::users::create_user))
        .route(prefix, get(handlers::users::list_users))
        .route(&format!("{prefix}/:id"), get(handlers::users::get_user))
}
