use crate::cli::ServeArgs;
use crate::infra::{load_applicants, AppState, InMemoryApplicationStore};
use crate::routes::with_portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use school_careers::config::AppConfig;
use school_careers::error::AppError;
use school_careers::telemetry;
use school_careers::workflows::intake::IntakeService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.applicants_csv.take() {
        config.directory.applicants_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let seeded = load_applicants(config.directory.applicants_csv.as_deref())?;
    info!(applicants = seeded.len(), "applicant directory seeded");
    let store = Arc::new(InMemoryApplicationStore::seeded(seeded));
    let intake_service = Arc::new(IntakeService::new(store.clone(), config.intake));
    let shutdown = intake_service.shutdown_token().clone();

    let app = with_portal_routes(intake_service, store)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "careers portal ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(%err, "failed to listen for shutdown signal");
            }
            info!("shutdown requested, cancelling pending submissions");
            readiness_flag.store(false, Ordering::Release);
            shutdown.cancel();
        })
        .await?;
    Ok(())
}
