//! HTTP API server for the event-sourced post service.
//!
//! Request flow: a route handler translates the body into a command and
//! hands it to the [`CommandBus`](domain::CommandBus); reads go through the
//! [`PostQueries`](projections::PostQueries) capability. Handler outcomes are
//! mapped to HTTP statuses in [`error`].

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use event_store::EventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::posts::AppState;

/// Builds the router with all routes and shared state.
pub fn create_app<S: EventStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/posts", get(routes::posts::list::<S>))
        .route("/api/posts", post(routes::posts::create::<S>))
        .route("/api/posts/{id}", get(routes::posts::get::<S>))
        .route("/api/posts/Enable", patch(routes::posts::enable::<S>))
        .route("/api/posts/Disable", patch(routes::posts::disable::<S>))
        .route("/api/posts/Publish", patch(routes::posts::publish::<S>))
        .route("/api/posts/Hide", patch(routes::posts::hide::<S>))
        .route(
            "/api/posts/UpdateContent",
            patch(routes::posts::update_content::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the default application state: command bus with every post handler,
/// the post directory read model, and its projection processor.
///
/// Panics on registration errors; bad wiring must never survive startup.
pub fn create_default_state<S: EventStore + Clone + 'static>(event_store: S) -> Arc<AppState<S>> {
    use domain::{CommandBus, POST_COMMAND_KINDS, register_post_handlers};
    use projections::{PostDirectoryView, Projection, ProjectionProcessor};

    let bus = register_post_handlers(CommandBus::builder(), event_store.clone())
        .expect("post handler registration failed")
        .build(POST_COMMAND_KINDS)
        .expect("command bus is missing a handler");

    let directory = Arc::new(PostDirectoryView::new());
    let mut processor = ProjectionProcessor::new(event_store);
    processor.register(Box::new(directory.as_ref().clone()) as Box<dyn Projection>);

    Arc::new(AppState {
        bus,
        queries: directory,
        processor: Arc::new(processor),
    })
}
