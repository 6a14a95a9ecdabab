use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{attendees, auth, events, forms, health, newsletter, partners, speakers, team};
use crate::services::image_store::{ImageStore, ImageStoreError};

/// Multipart framing overhead allowed on top of the file size limits.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub image_store: Arc<ImageStore>,
}

/// Errors building the application from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("JWT configuration error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Image store configuration error: {0}")]
    ImageStore(#[from] ImageStoreError),
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Self, StartupError> {
        let jwt = config.jwt.signing_config()?;
        let image_store =
            ImageStore::from_config(&config.image_store, config.limits.max_image_bytes)?;

        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            image_store: Arc::new(image_store),
        })
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, StartupError> {
    let state = AppState::new(config, pool)?;
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        // Development: allow any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let upload_limit =
        DefaultBodyLimit::max(config.limits.max_upload_bytes + MULTIPART_OVERHEAD_BYTES);
    let image_limit =
        DefaultBodyLimit::max(config.limits.max_image_bytes + MULTIPART_OVERHEAD_BYTES);

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/profile", get(auth::profile))
        .route("/api/v1/events", get(events::list_published_events))
        .route("/api/v1/events/:id", get(events::get_published_event))
        .route("/api/v1/speakers", get(speakers::list_speakers))
        .route("/api/v1/partners", get(partners::list_partners))
        .route("/api/v1/team", get(team::list_visible_team))
        .route("/api/v1/newsletter/subscribe", post(newsletter::subscribe))
        .route(
            "/api/v1/forms/:kind",
            get(forms::get_form_schema).post(forms::submit_application),
        );

    // Admin routes authorize through the AdminUser extractor
    let admin_routes = Router::new()
        .route(
            "/api/v1/events/:id/attendees/upload",
            post(attendees::upload_attendees).layer(upload_limit),
        )
        .route("/api/v1/events/:id/attendees", get(attendees::list_attendees))
        .route(
            "/api/v1/events/:id/attendees/:attendee_id/qr",
            get(attendees::get_attendee_qr),
        )
        .route("/api/v1/attendees/validate", post(attendees::validate_qr))
        .route(
            "/api/v1/admin/events",
            get(events::list_all_events).post(events::create_event),
        )
        .route(
            "/api/v1/admin/events/:id",
            put(events::update_event).delete(events::delete_event),
        )
        .route(
            "/api/v1/admin/team",
            get(team::list_team).post(team::create_team_member),
        )
        .route("/api/v1/admin/team/export", get(team::export_team))
        .route(
            "/api/v1/admin/team/:id",
            get(team::get_team_member)
                .put(team::update_team_member)
                .delete(team::delete_team_member),
        )
        .route(
            "/api/v1/admin/team/:id/visibility",
            patch(team::toggle_visibility),
        )
        .route(
            "/api/v1/admin/team/:id/image",
            post(team::upload_team_image).layer(image_limit),
        )
        .route("/api/v1/admin/newsletter", get(newsletter::list_subscriptions))
        .route(
            "/api/v1/admin/newsletter/export",
            get(newsletter::export_subscriptions),
        )
        .route(
            "/api/v1/admin/newsletter/:id",
            axum::routing::delete(newsletter::delete_subscription),
        )
        .route(
            "/api/v1/admin/newsletter/:id/status",
            patch(newsletter::update_subscription_status),
        )
        .route("/api/v1/admin/speakers", post(speakers::create_speaker))
        .route(
            "/api/v1/admin/speakers/:id",
            put(speakers::update_speaker).delete(speakers::delete_speaker),
        )
        .route("/api/v1/admin/partners", post(partners::create_partner))
        .route(
            "/api/v1/admin/partners/:id",
            put(partners::update_partner).delete(partners::delete_partner),
        )
        .route("/api/v1/admin/applications", get(forms::list_applications))
        .route(
            "/api/v1/admin/applications/:id/status",
            patch(forms::update_application_status),
        );

    Ok(Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn_with_state(
            config.security.hsts_enabled,
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
