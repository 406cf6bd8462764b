//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{DashboardService, IdentityService, RosterService, TicketService};
use crate::config::{AppConfig, CorsConfig};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    admin, auth, dashboard, health, metrics as metrics_module, request_id, tickets,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        // Tickets
        tickets::list_tickets,
        tickets::submit_ticket,
        tickets::list_priorities,
        tickets::get_ticket,
        tickets::update_ticket,
        tickets::delete_ticket,
        tickets::update_status,
        tickets::mark_done,
        // Dashboard
        dashboard::get_dashboard,
        // Admin
        admin::list_users,
        admin::grant_admin,
        admin::revoke_admin,
    ),
    components(
        schemas(
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::ChangePasswordRequest,
            tickets::TicketDto,
            tickets::PermissionsDto,
            tickets::TicketStatsDto,
            tickets::TicketListResponse,
            tickets::CreateTicketRequest,
            tickets::UpdateTicketRequest,
            tickets::UpdateStatusRequest,
            tickets::PriorityOption,
            dashboard::DashboardResponse,
            admin::RosterEntryDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Registration, login (JWT), profile and password change"),
        (name = "Tickets", description = "Submit, list, edit and triage support tickets"),
        (name = "Dashboard", description = "Landing view: own tickets for employees, active tickets and roster for admins"),
        (name = "Admin", description = "User roster and admin membership"),
    ),
    info(
        title = "IT Helpdesk API",
        version = "1.0.0",
        description = "REST API for the internal IT-support ticketing service",
    )
)]
pub struct ApiDoc;

/// Everything the router needs to serve requests
#[derive(Clone)]
pub struct ApiContext {
    pub repos: Arc<dyn RepositoryProvider>,
    pub identity: Arc<IdentityService>,
    pub tickets: Arc<TicketService>,
    pub roster: Arc<RosterService>,
    pub dashboard: Arc<DashboardService>,
    pub jwt_config: JwtConfig,
    pub db: DatabaseConnection,
    pub metrics: PrometheusHandle,
    pub cors: CorsConfig,
    pub started_at: Arc<Instant>,
}

impl ApiContext {
    /// Wire the application services over one repository provider.
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        db: DatabaseConnection,
        config: &AppConfig,
        metrics: PrometheusHandle,
    ) -> Self {
        let jwt_config = JwtConfig::from(&config.security);
        let identity = Arc::new(IdentityService::new(
            repos.clone(),
            jwt_config.clone(),
            config.security.bcrypt_cost,
        ));
        let tickets = Arc::new(TicketService::new(repos.clone()));
        let roster = Arc::new(RosterService::new(repos.clone()));
        let dashboard = Arc::new(DashboardService::new(tickets.clone(), roster.clone()));

        Self {
            repos,
            identity,
            tickets,
            roster,
            dashboard,
            jwt_config,
            db,
            metrics,
            cors: config.cors.clone(),
            started_at: Arc::new(Instant::now()),
        }
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn not_found() -> (StatusCode, Json<ApiResponse<EmptyData>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Route not found")))
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        jwt_config: ctx.jwt_config.clone(),
        repos: ctx.repos.clone(),
    };
    let require_auth = || middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    // Auth routes (public)
    let auth_handler_state = auth::AuthHandlerState {
        identity: ctx.identity.clone(),
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(require_auth())
        .with_state(auth_handler_state);

    // Ticket routes (protected)
    let ticket_routes = Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::submit_ticket))
        .route("/priorities", get(tickets::list_priorities))
        .route(
            "/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route("/{id}/status", put(tickets::update_status))
        .route("/{id}/done", post(tickets::mark_done))
        .layer(require_auth())
        .with_state(tickets::TicketHandlerState {
            tickets: ctx.tickets.clone(),
        });

    // Dashboard (protected)
    let dashboard_routes = Router::new()
        .route("/", get(dashboard::get_dashboard))
        .layer(require_auth())
        .with_state(dashboard::DashboardHandlerState {
            dashboard: ctx.dashboard.clone(),
        });

    // Admin routes (protected + admin only); auth runs first
    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route(
            "/users/{id}/admin",
            post(admin::grant_admin).delete(admin::revoke_admin),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(require_auth())
        .with_state(admin::AdminHandlerState {
            roster: ctx.roster.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db.clone(),
            started_at: ctx.started_at.clone(),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_module::prometheus_metrics))
        .with_state(metrics_module::MetricsState {
            handle: ctx.metrics.clone(),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/auth", auth_routes.merge(auth_protected_routes))
        .nest("/api/v1/tickets", ticket_routes)
        .nest("/api/v1/dashboard", dashboard_routes)
        .nest("/api/v1/admin", admin_routes)
        .fallback(not_found)
        // Middleware
        .layer(middleware::from_fn(metrics_module::http_metrics_middleware))
        .layer(cors_layer(&ctx.cors))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}
