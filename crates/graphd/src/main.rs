pub(crate) mod cli;

use api_graph::layers::make_cors_middleware;
use api_graph::router::create_router;
use api_graph::state::AppState;
use clap::Parser;
use core_executor::QueryCoordinator;
use core_graphdb::{GraphDb, Neo4jHttpDb};
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const TARGETS: [&str; 4] = ["graphd", "api_graph", "core_executor", "core_graphdb"];

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

#[tokio::main]
#[allow(clippy::expect_used)]
async fn main() {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    let web_config = opts.web_config();
    let db: Arc<dyn GraphDb> =
        Arc::new(Neo4jHttpDb::new(&opts.neo4j_config()).expect("Failed to create Neo4j client"));
    tracing::info!(db = ?db, "Using graph database");

    let coordinator = Arc::new(QueryCoordinator::new(
        db,
        Arc::new(opts.execution_config()),
    ));

    let router = create_router().with_state(AppState::new(coordinator));
    let router = match web_config.allow_origin.as_deref() {
        Some(allow_origin) => router.layer(
            make_cors_middleware(allow_origin).expect("Failed to parse CORS allow origin"),
        ),
        None => router,
    };
    let router = router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CatchPanicLayer::new())
        .into_make_service_with_connect_info::<SocketAddr>();

    let host = web_config.host.clone();
    let port = web_config.port;
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to get local address");
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

#[allow(clippy::print_stderr)]
fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };
    let level: LevelFilter = opts.tracing_level.into();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(LevelFilter::DEBUG))
                                .with_default(LevelFilter::DEBUG)
                        }
                    },
                    // other crates stay at INFO whatever level our own crates log at
                    _ => Targets::default()
                        .with_targets(targets_with_level(level))
                        .with_default(LevelFilter::INFO.min(level)),
                }),
        )
        .init();
}

/// Waits for Ctrl+C or SIGTERM.
///
/// # Panics
/// If the function fails to install the signal handler, it will panic.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::warn!("Ctrl+C received, starting graceful shutdown");
        },
        () = terminate => {
            tracing::warn!("SIGTERM received, starting graceful shutdown");
        },
    }
}
