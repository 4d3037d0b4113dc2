pub mod config;
pub mod constants;
pub mod error;
pub mod methods;
pub mod shutdown;
pub mod state;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::config::MiddlewareConfig;
use crate::methods::create_user::{__path_create_user, create_user};
use crate::methods::delete_user::{__path_delete_user, delete_user};
use crate::methods::entities::{
    CreateUserRequest, EnvelopeResponse, HeaderResponse, PaginatedResponse, RoleResponse,
    UpdateUserRequest, UserResponse,
};
use crate::methods::get_roles::{__path_get_roles, get_roles};
use crate::methods::get_user_by_id::{__path_get_user_by_id, get_user_by_id};
use crate::methods::get_users::{__path_get_users, get_users};
use crate::methods::health_check::{__path_health_check, health_check};
use crate::methods::update_user::{__path_update_user, update_user};
use crate::methods::routes::{
    API_V1_PREFIX, OPENAPI_JSON_PATH, ROLES_PATH, SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH,
    USERS_BY_ID_PATH, USERS_PATH,
};
use crate::state::AppState;

/// Versioned endpoints; mounted under `API_V1_PREFIX` by `ApiDoc`.
#[derive(OpenApi)]
#[openapi(
    paths(
        get_users, get_user_by_id, create_user, update_user, delete_user,
        get_roles
    ),
    components(schemas(
        CreateUserRequest, UpdateUserRequest, UserResponse, RoleResponse, HeaderResponse,
        EnvelopeResponse<UserResponse>, EnvelopeResponse<bool>,
        PaginatedResponse<UserResponse>, PaginatedResponse<RoleResponse>
    ))
)]
struct ApiV1Doc;

#[derive(OpenApi)]
#[openapi(
    paths(health_check),
    nest(
        (path = "/v1", api = ApiV1Doc)
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "roles", description = "Role catalogue"),
        (name = "service", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Versioned API routes plus health and docs, without the middleware stack.
pub fn app<U, R>(state: AppState<U, R>) -> Router
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    let v1_routes = Router::new()
        .route(USERS_PATH, get(get_users::<U, R>).post(create_user::<U, R>))
        .route(
            USERS_BY_ID_PATH,
            get(get_user_by_id::<U, R>)
                .put(update_user::<U, R>)
                .delete(delete_user::<U, R>),
        )
        .route(ROLES_PATH, get(get_roles::<U, R>));

    let root_routes = Router::new()
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    Router::new()
        .nest(API_V1_PREFIX, v1_routes)
        .merge(root_routes)
        .with_state(state)
}

fn cors_layer(config: &MiddlewareConfig) -> CorsLayer {
    let x_request_id = HeaderName::from_static("x-request-id");
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let layer = if config.allows_any_origin() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    layer
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id])
}

/// Wraps `router` in the middleware stack.
///
/// Order, outermost first: rate limit, timeout, CORS, body limit, request id,
/// trace. The rate limiter keys on the peer address, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn with_middleware(router: Router, config: &MiddlewareConfig) -> Result<Router, String> {
    let x_request_id = HeaderName::from_static("x-request-id");

    let mut app = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    app = app.layer(RequestBodyLimitLayer::new(config.max_body_size));

    app = app.layer(cors_layer(config));

    // Returns 408 on expiry
    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        config.request_timeout,
    ));

    // 60000ms spread over the per-minute quota
    let replenish_interval_ms = (60_000 / u64::from(config.rate_limit_per_minute.max(1))).max(1);
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_interval_ms)
        .burst_size(config.rate_limit_burst.max(1))
        .finish()
        .ok_or_else(|| "invalid rate limit configuration".to_string())?;

    Ok(app.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}
