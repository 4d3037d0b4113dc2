use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use office_api::config::ServiceConfig;
use office_api::constants::{LOCAL_ENV, SERVICE};
use office_api::shutdown::shutdown_signal;
use office_api::state::AppState;
use office_api::{app, with_middleware};
use office_lib::repository::{RoleRepository, UserRepository};
use office_lib::user_service::UserService;
use office_lib::util::connect_with_retry;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(env: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_tracing(&config.env);
    tracing::info!(service = SERVICE, env = %config.env, "tracing initialized");

    let middleware_config = &config.middleware;
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let pool = connect_with_retry(&config.database_url, config.database_connect_retries).await?;

    let user_service = UserService::new(
        UserRepository::new(pool.clone()),
        RoleRepository::new(pool),
    );
    let state = AppState::new(user_service, config.env.clone());

    let router = with_middleware(app(state), middleware_config)?;

    let addr = format!("0.0.0.0:{}", config.port);
    let public_url = format!("http://127.0.0.1:{}", config.port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("{} is ready to accept requests at: {}", SERVICE, public_url);
    tracing::info!("API v1 endpoints available at: {}/v1", public_url);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(middleware_config.shutdown_timeout))
    .await
    .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
