use anyhow::Result;
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use salesboard::config::{Settings, initialize_app_state};
use salesboard::router::create_router;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "salesboard=debug,compute=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Salesboard starting up");

    // Load configuration
    let settings = Settings::load()?;
    debug!("Settings: {:?}", settings);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state(&settings) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Create router and mount Prometheus metrics
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let app = create_router(state)
        .route("/metrics", get(move || std::future::ready(metric_handle.render())))
        .layer(prometheus_layer);

    // Start server
    let bind_address = &settings.bind_address;
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Salesboard API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
