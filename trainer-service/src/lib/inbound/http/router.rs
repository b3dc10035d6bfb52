use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_food_item::create_food_item;
use super::handlers::log_exercise::log_exercise;
use super::handlers::log_food::log_food;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::view_food::view_food;
use super::middleware::authenticate;
use crate::domain::food::ports::FoodServicePort;
use crate::domain::training::ports::TrainingServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub food_service: Arc<dyn FoodServicePort>,
    pub training_service: Arc<dyn TrainingServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    food_service: Arc<dyn FoodServicePort>,
    training_service: Arc<dyn TrainingServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        food_service,
        training_service,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/food/create", post(create_food_item))
        .route("/food/log", post(log_food))
        .route("/food/view", get(view_food))
        .route("/training/log", post(log_exercise))
        .route_layer(middleware::from_fn_with_state(authenticator, authenticate));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|_request: &Request<Body>, _span: &Span| {
            tracing::debug!("Request started");
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
