use axum::{Server, http::HeaderValue, middleware::from_fn};
use review_assigner::{
    AppState, config::Config, db, error::AppError, init_tracing,
    middleware::request_tracking_middleware, routes::create_router, shutdown::shutdown_signal,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server terminated");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let pool = db::connect(&config.database()?)?;
    if config.database_run_migrations {
        db::run_migrations(&pool)?;
    }

    let cors = cors_layer(&config.server().cors_origins);
    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(AppState::new(pool, config));
    let app = create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware));

    tracing::info!(%addr, "Server listening");
    Server::try_bind(&addr)
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    layer.allow_origin(origins)
}
