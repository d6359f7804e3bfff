use std::sync::Arc;
use std::time::Duration;

use auth::AccessPolicy;
use auth::Role;
use auth::RoleSet;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::me::me;
use super::handlers::restaurants::create_restaurant;
use super::handlers::restaurants::delete_restaurant;
use super::handlers::restaurants::get_restaurant;
use super::handlers::restaurants::list_restaurants;
use super::handlers::restaurants::update_restaurant;
use super::handlers::sessions::login;
use super::handlers::sessions::refresh;
use super::handlers::sessions::register;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_roles;
use super::middleware::RoleGate;
use crate::domain::health::HealthCheck;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::restaurant::ports::RestaurantServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub restaurant_service: Arc<dyn RestaurantServicePort>,
    pub health_check: Arc<dyn HealthCheck>,
    pub access_policy: AccessPolicy,
}

pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh));

    let authenticated_routes = Router::new()
        .route("/api/v1/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let superadmin_gate = RoleGate::new(
        state.access_policy.clone(),
        RoleSet::of([Role::SuperAdmin]),
    );
    let superadmin_routes = Router::new()
        .route(
            "/api/v1/restaurants",
            get(list_restaurants).post(create_restaurant),
        )
        .route(
            "/api/v1/restaurants/:id",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route_layer(middleware::from_fn_with_state(
            superadmin_gate,
            require_roles,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id = %request_id,
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
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
        .merge(authenticated_routes)
        .merge(superadmin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace_layer)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
