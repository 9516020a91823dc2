use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{approval, auth, club, event, health, staff};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Onboarding
        .route("/api/v1/staff", post(staff::create_staff))
        .route("/api/v1/clubs", post(club::create_club))
        .route("/api/v1/clubs/{club_id}", get(club::get_club))

        // Events
        .route("/api/v1/events", post(event::create_event))
        .route("/api/v1/events/mine", get(event::list_my_events))
        .route("/api/v1/events/pending", get(approval::list_pending))
        .route("/api/v1/events/history", get(event::list_history))
        .route("/api/v1/events/upcoming", get(event::list_upcoming))
        .route("/api/v1/events/{event_id}", get(event::get_event))

        // Approval chain
        .route("/api/v1/events/{event_id}/faculty-decision", patch(approval::faculty_decision))
        .route("/api/v1/events/{event_id}/venue-decision", patch(approval::venue_decision))
        .route("/api/v1/events/{event_id}/hod-decision", patch(approval::hod_decision))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
