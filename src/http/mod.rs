//! HTTP boundary - axum router over the registry services.
//!
//! Handlers translate JSON to core inputs, call the services in `crate::core`, and map
//! outcomes to status codes. No relationship rule lives here.

pub mod error;
pub mod extractors;
pub mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::errors::{Error, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<DatabaseConnection>,
}

impl AppState {
    /// Wraps the database connection shared by all handlers.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    /// The shared database connection.
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Builds the full router: `/health` plus the resource routes under `/api`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes())
        .fallback(routes::endpoint_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    use routes::{courses, students, teachers};

    Router::new()
        // Courses
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/courses/{id}/students", get(courses::list_course_students))
        .route("/courses/{id}/teachers", get(courses::list_course_teachers))
        // Teachers
        .route(
            "/teachers",
            get(teachers::list_teachers).post(teachers::create_teacher),
        )
        .route(
            "/teachers/{id}",
            get(teachers::get_teacher)
                .put(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        )
        .route("/teachers/{id}/courses", get(teachers::get_teacher_course))
        .route("/teachers/{id}/students", get(teachers::list_teacher_students))
        .route(
            "/teachers/{teacher_id}/courses/{course_id}",
            post(teachers::assign_course).delete(teachers::remove_course),
        )
        // Students
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/students/{id}/courses", get(students::list_student_courses))
        .route("/students/{id}/teachers", get(students::list_student_teachers))
        .route(
            "/students/{student_id}/teachers/{teacher_id}",
            post(students::assign_teacher).delete(students::remove_teacher),
        )
        .route(
            "/students/{student_id}/courses/{course_id}",
            post(students::assign_course).delete(students::remove_course),
        )
}

/// Binds to the configured address and serves until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns `Error::Io` if the listener cannot bind and `Error::Server` if serving fails.
pub async fn serve(settings: &Settings, db: DatabaseConnection) -> Result<()> {
    let app = build_router(AppState::new(db));
    let addr = settings.bind_address();

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Server {
            message: e.to_string(),
        })?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
