use crate::cli::ServeArgs;
use crate::infra::{build_context, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hostel_allocation::config::AppConfig;
use hostel_allocation::error::AppError;
use hostel_allocation::identity::Gender;
use hostel_allocation::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let context = build_context(config.auth.token_ttl_minutes);
    let admin = context.identity.provision_admin(
        "Hall Administrator",
        &config.auth.admin_email,
        &config.auth.admin_password,
        Gender::Female,
    )?;
    info!(admin = %admin.email, "bootstrap administrator ready");

    let app = with_service_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hostel allocation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
